//! The node's RPC catalogue, grouped the way the node's `help` output
//! groups it.
//!
//! Every function takes any [`Transport`](crate::rpc::Transport), builds the
//! parameter list, issues one call and normalizes the reply. Pass a
//! [`Node`](crate::Node) to get connectivity tracking for free.

/// Declares a closed set of string options accepted by an RPC sub-command.
///
/// Generates `as_str`, `Display`, and a `FromStr` that rejects unknown
/// strings with the list of accepted values. Attributes on the set and on
/// each variant are passed through, so `#[derive(Default)]` plus a
/// `#[default]` variant works as on a plain enum.
macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == s)
                    .ok_or_else(|| {
                        let available: Vec<&str> =
                            Self::ALL.iter().map(|option| option.as_str()).collect();
                        crate::error::CoreError::InvalidArgument(format!(
                            "Available options are: {available:?}"
                        ))
                    })
            }
        }
    };
}

pub mod blockchain;
pub mod governance;
pub mod help;
pub mod masternode;
pub mod network;
pub mod transactions;
pub mod utils;
pub mod wallet;

pub use governance::{GobjectListSignal, GobjectListType};
pub use masternode::{MasternodeCountOption, MasternodeListMode, MasternodeStartMode};
pub use transactions::ListTransactionsQuery;
pub use wallet::SendOptions;
