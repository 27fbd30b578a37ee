//! Guild permission bitflags
//!
//! Only the bits the bot inspects are named. Unknown bits coming from the
//! platform are dropped on conversion.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Platform permission flags, using the platform's bit positions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Bypass all permission checks
        const ADMINISTRATOR    = 1 << 3;
        /// Create, edit, delete channels
        const MANAGE_CHANNELS  = 1 << 4;
        /// Edit guild settings (gates the settings command)
        const MANAGE_GUILD     = 1 << 5;
        /// Add emoji reactions
        const ADD_REACTIONS    = 1 << 6;
        /// View channel and read messages
        const VIEW_CHANNEL     = 1 << 10;
        /// Send messages in text channels
        const SEND_MESSAGES    = 1 << 11;
        /// Delete or pin other users' messages
        const MANAGE_MESSAGES  = 1 << 13;
        /// Upload files and images
        const ATTACH_FILES     = 1 << 15;
        /// Create, edit, delete, assign roles
        const MANAGE_ROLES     = 1 << 28;
        /// Archive and lock threads
        const MANAGE_THREADS   = 1 << 34;
    }
}

impl Permissions {
    /// Check if the permission set contains a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// Create from the raw bits the platform reports
    #[inline]
    pub fn from_raw(bits: u64) -> Self {
        Permissions::from_bits_truncate(bits)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// The platform sends permission bits as decimal strings
impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PermissionsVisitor;

        impl Visitor<'_> for PermissionsVisitor {
            type Value = Permissions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing permission bits")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                Ok(Permissions::from_raw(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Permissions, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(Permissions::from_raw)
                    .map_err(|_| de::Error::custom("invalid permissions string"))
            }
        }

        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl From<u64> for Permissions {
    fn from(bits: u64) -> Self {
        Permissions::from_raw(bits)
    }
}
