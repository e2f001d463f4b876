//! Role classification.
//!
//! Roles form a flat set. There is no ordering between them: a route that
//! admits "superuser or higher" lists both [`Role::Root`] and
//! [`Role::SuperUser`] explicitly.

use std::fmt;

use crate::identity::UserIdentity;

/// Access-control classification of a caller.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    Root,
    SuperUser,
    MerchantTypeA,
    MerchantTypeB,
    Buyer,
}

impl Role {
    /// Returns the wire name (e.g. `"merchant_type_001"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root          => "root",
            Self::SuperUser     => "superuser",
            Self::MerchantTypeA => "merchant_type_001",
            Self::MerchantTypeB => "merchant_type_002",
            Self::Buyer         => "buyer",
        }
    }

    /// Maps a numeric user id onto its role. Total and side-effect free.
    ///
    /// | id | role |
    /// |---|---|
    /// | 1 | `Root` |
    /// | 2..=99 | `SuperUser` |
    /// | 100..=199 | `MerchantTypeA` |
    /// | 200..=299 | `MerchantTypeB` |
    /// | anything else | `Buyer` |
    pub fn classify(id: u64) -> Self {
        match id {
            1         => Self::Root,
            2..=99    => Self::SuperUser,
            100..=199 => Self::MerchantTypeA,
            200..=299 => Self::MerchantTypeB,
            _         => Self::Buyer,
        }
    }

    pub fn of(identity: &UserIdentity) -> Self {
        Self::classify(identity.id())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
