//! Export request envelopes.

/// Which half of the chart of accounts to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Groups,
    Ledgers,
}

impl AccountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groups => "Groups",
            Self::Ledgers => "Ledgers",
        }
    }
}

/// `List of Accounts` export request for `account_type`.
#[must_use]
pub fn export_envelope(account_type: AccountType) -> String {
    format!(
        "<ENVELOPE>\
<HEADER><TALLYREQUEST>Export Data</TALLYREQUEST></HEADER>\
<BODY><EXPORTDATA><REQUESTDESC>\
<REPORTNAME>List of Accounts</REPORTNAME>\
<STATICVARIABLES><ACCOUNTTYPE>{}</ACCOUNTTYPE></STATICVARIABLES>\
</REQUESTDESC></EXPORTDATA></BODY>\
</ENVELOPE>",
        account_type.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_names_account_type() {
        let xml = export_envelope(AccountType::Ledgers);
        assert!(xml.starts_with("<ENVELOPE>"));
        assert!(xml.contains("<TALLYREQUEST>Export Data</TALLYREQUEST>"));
        assert!(xml.contains("<REPORTNAME>List of Accounts</REPORTNAME>"));
        assert!(xml.contains("<ACCOUNTTYPE>Ledgers</ACCOUNTTYPE>"));
        assert!(export_envelope(AccountType::Groups).contains("<ACCOUNTTYPE>Groups</ACCOUNTTYPE>"));
    }
}
