//! Links a host hands to a phone, usually rendered as a QR code.

use url::Url;

use crate::domain::{Role, SessionId};

/// Builds `<origin+path>?role=phone&session=<id>`, discarding any query or
/// fragment already present on `base`.
pub fn pairing_link(base: &Url, session: &SessionId) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair("role", "phone")
        .append_pair("session", session.as_str());
    url
}

/// Reads the role and session a page was opened with. A missing or unknown
/// `role` means host; a missing or empty `session` yields `None`.
pub fn parse_pairing_link(url: &Url) -> (Role, Option<SessionId>) {
    let mut role = Role::Host;
    let mut session = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "role" if value == "phone" => role = Role::Phone,
            "session" => session = SessionId::parse(&value),
            _ => {}
        }
    }
    (role, session)
}

#[cfg(test)]
#[path = "tests/pairing_tests.rs"]
mod tests;
