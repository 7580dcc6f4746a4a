/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Venue adapter seam for Logon customization.

use crate::config::SessionConfig;
use ferrofix_core::field::Field;
use ferrofix_core::types::UtcTimestamp;
use std::fmt;

/// Hook invoked once per outbound Logon to contribute venue fields.
///
/// Venues that authenticate at the FIX layer (API keys, HMAC signatures over
/// a timestamped payload, base64 nonces) implement this trait in their
/// adapter crate; the signing itself stays adapter-local. Adapters that add
/// proprietary tags should also register descriptors with the field registry
/// before any session starts.
pub trait LogonAuthorizer: Send + Sync + fmt::Debug {
    /// Returns the fields to append to the Logon body.
    ///
    /// `now` is the SendingTime the engine will stamp on the Logon, so
    /// signatures over the timestamp match the wire.
    fn logon_fields(&self, config: &SessionConfig, now: UtcTimestamp) -> Vec<Field>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrofix_core::tags;
    use ferrofix_core::types::{CompId, FixVersion};

    #[derive(Debug)]
    struct StaticCredentials {
        username: String,
        password: String,
    }

    impl LogonAuthorizer for StaticCredentials {
        fn logon_fields(&self, _config: &SessionConfig, _now: UtcTimestamp) -> Vec<Field> {
            vec![
                Field::str(tags::USERNAME, self.username.clone()),
                Field::str(tags::PASSWORD, self.password.clone()),
            ]
        }
    }

    #[test]
    fn test_authorizer_contributes_fields() {
        let auth = StaticCredentials {
            username: "alice".into(),
            password: "hunter2".into(),
        };
        let config = SessionConfig::new(
            CompId::new("C").unwrap(),
            CompId::new("S").unwrap(),
            FixVersion::Fix44,
        );
        let fields = auth.logon_fields(&config, UtcTimestamp::now());
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].tag, tags::USERNAME);
    }
}
