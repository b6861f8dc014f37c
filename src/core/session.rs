//! Session state
//!
//! One session at a time: login starts it, logout resets it. The only state
//! that survives a reset is `ever_logged_in`, which selects the wording of
//! the not-logged-in rejection for the rest of the process lifetime.

/// Privilege level of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Acts only on the holder's own accounts, subject to session ceilings
    Standard,
    /// Acts on any account, no ceilings, may administer the ledger
    Admin,
}

/// The single, sequentially accessed session
///
/// Mode validation happens at the login handler; `start` trusts its caller.
#[derive(Debug)]
pub struct SessionState {
    logged_in: bool,
    privilege: Privilege,
    holder: String,
    ever_logged_in: bool,
}

impl SessionState {
    /// A logged-out session that has never seen a login.
    pub fn new() -> Self {
        SessionState {
            logged_in: false,
            privilege: Privilege::Standard,
            holder: String::new(),
            ever_logged_in: false,
        }
    }

    /// Begin a session. The holder name is empty for admin sessions.
    pub fn start(&mut self, privilege: Privilege, holder: &str) {
        self.logged_in = true;
        self.privilege = privilege;
        self.holder = holder.to_string();
        self.ever_logged_in = true;
    }

    /// End the session, keeping only the sticky ever-logged-in flag.
    pub fn end(&mut self) {
        self.logged_in = false;
        self.privilege = Privilege::Standard;
        self.holder.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.logged_in && self.privilege == Privilege::Admin
    }

    /// Holder name of the current session; empty for admin sessions and
    /// when logged out.
    pub fn holder_name(&self) -> &str {
        &self.holder
    }

    /// Whether any login has ever succeeded in this process.
    pub fn has_ever_logged_in(&self) -> bool {
        self.ever_logged_in
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
