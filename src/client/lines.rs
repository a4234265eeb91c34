//! Line discovery across every billing account of the authenticated user.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, wire::LineDetail},
	error::ProtocolError,
	http::ApiHttpClient,
	obs::{self, OpKind},
	telephony::{BillingAccount, IdentifierError, Line, LineNumber},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Enumerates billing accounts, their lines, and each line's detail.
	///
	/// Only the account enumeration itself is fatal. A billing account whose lines cannot be
	/// listed, or a line whose detail cannot be fetched, is logged and left out; the remaining
	/// lines are returned in provider order.
	pub async fn list_lines(&self) -> Result<Vec<Line>> {
		obs::observe(OpKind::ListLines, None, async move {
			let accounts: Vec<String> = self.get_json(&["telephony"]).await?;
			let mut lines = Vec::new();

			for account in accounts {
				match self.account_lines(&account).await {
					Ok(found) => lines.extend(found),
					Err(e) => obs::warn_skipped_entry(&account, &e),
				}
			}

			Ok(lines)
		})
		.await
	}

	async fn account_lines(&self, account: &str) -> Result<Vec<Line>> {
		let service_name = identifier(BillingAccount::new(account))?;
		let ids: Vec<String> = self.get_json(&["telephony", account, "line"]).await?;
		let mut lines = Vec::with_capacity(ids.len());

		for id in ids {
			match self.line_detail(&service_name, &id).await {
				Ok(line) => lines.push(line),
				Err(e) => obs::warn_skipped_entry(&format!("{account}/{id}"), &e),
			}
		}

		Ok(lines)
	}

	async fn line_detail(&self, service_name: &BillingAccount, id: &str) -> Result<Line> {
		let detail: LineDetail =
			self.get_json(&["telephony", service_name.as_ref(), "line", id]).await?;
		let line_number = identifier(LineNumber::new(detail.line_number(id)))?;

		Ok(Line::new(service_name.clone(), line_number, detail.description))
	}
}

fn identifier<T>(parsed: Result<T, IdentifierError>) -> Result<T> {
	parsed.map_err(|e| ProtocolError::from(e).into())
}
