//! Login sessions. A session is an opaque random token bound to an
//! [`Identity`] until logout.

use std::collections::HashMap;

use uuid::Uuid;

use crate::Identity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: Uuid,
    pub identity: Identity,
}

#[derive(Debug, Default)]
pub struct Sessions {
    active: HashMap<Uuid, Identity>,
}

impl Sessions {
    pub fn open(&mut self, identity: Identity) -> Session {
        let token = Uuid::new_v4();
        self.active.insert(token, identity.clone());
        Session { token, identity }
    }

    pub fn current(&self, token: &Uuid) -> Option<&Identity> {
        self.active.get(token)
    }

    /// Ends the session. Unknown tokens are ignored.
    pub fn close(&mut self, token: &Uuid) -> Option<Identity> {
        self.active.remove(token)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close() {
        let mut sessions = Sessions::default();
        let session = sessions.open(Identity::new("admin"));

        assert_eq!(sessions.current(&session.token), Some(&Identity::new("admin")));
        assert_eq!(sessions.close(&session.token), Some(Identity::new("admin")));
        assert_eq!(sessions.current(&session.token), None);
        assert!(sessions.is_empty());
    }

    #[test]
    fn tokens_are_distinct_per_login() {
        let mut sessions = Sessions::default();
        let a = sessions.open(Identity::new("admin"));
        let b = sessions.open(Identity::new("admin"));

        assert_ne!(a.token, b.token);
        assert_eq!(sessions.len(), 2);

        sessions.close(&a.token);
        assert_eq!(sessions.current(&b.token), Some(&Identity::new("admin")));
    }

    #[test]
    fn closing_unknown_token_is_noop() {
        let mut sessions = Sessions::default();
        sessions.open(Identity::new("admin"));
        assert_eq!(sessions.close(&Uuid::new_v4()), None);
        assert_eq!(sessions.len(), 1);
    }
}
