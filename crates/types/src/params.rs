//! Transaction-processing cost parameters.
//!
//! A flat set of numeric knobs read by the ante handler. The registry only
//! exposes them to an external key-value parameter store as ordered
//! `(key, slot, validator)` triples; every current parameter simply rejects
//! zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum memo length in characters.
pub const DEFAULT_MAX_MEMO_CHARACTERS: u64 = 20_971_520;
/// Default maximum number of signatures per transaction.
pub const DEFAULT_TX_SIG_LIMIT: u64 = 7;
/// Default gas charged per transaction byte.
pub const DEFAULT_TX_SIZE_COST_PER_BYTE: u64 = 10;
/// Default gas for verifying an Ed25519 signature.
pub const DEFAULT_SIG_VERIFY_COST_ED25519: u64 = 590;
/// Default gas for verifying a secp256k1 signature.
pub const DEFAULT_SIG_VERIFY_COST_SECP256K1: u64 = 1000;
/// Default gas for verifying an SM2 signature.
pub const DEFAULT_SIG_VERIFY_COST_SM2: u64 = 7850;

/// Store key of [`AuthParams::max_memo_characters`].
pub const KEY_MAX_MEMO_CHARACTERS: &[u8] = b"MaxMemoCharacters";
/// Store key of [`AuthParams::tx_sig_limit`].
pub const KEY_TX_SIG_LIMIT: &[u8] = b"TxSigLimit";
/// Store key of [`AuthParams::tx_size_cost_per_byte`].
pub const KEY_TX_SIZE_COST_PER_BYTE: &[u8] = b"TxSizeCostPerByte";
/// Store key of [`AuthParams::sig_verify_cost_ed25519`].
pub const KEY_SIG_VERIFY_COST_ED25519: &[u8] = b"SigVerifyCostED25519";
/// Store key of [`AuthParams::sig_verify_cost_secp256k1`].
pub const KEY_SIG_VERIFY_COST_SECP256K1: &[u8] = b"SigVerifyCostSecp256k1";
/// Store key of [`AuthParams::sig_verify_cost_sm2`].
pub const KEY_SIG_VERIFY_COST_SM2: &[u8] = b"SigVerifyCostSm2";

/// A parameter failed its bounds check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name}: {value}")]
pub struct ParamError {
    /// Human-readable parameter name.
    pub name: &'static str,
    /// Rejected value.
    pub value: u64,
}

/// Per-parameter bounds check.
pub type ParamValidator = fn(u64) -> Result<(), ParamError>;

/// One registry entry: store key, mutable slot and its validator.
pub struct ParamSetPair<'a> {
    /// Key in the parameter store.
    pub key: &'static [u8],
    /// Field backing the parameter.
    pub value: &'a mut u64,
    /// Bounds check applied before the value is stored.
    pub validator: ParamValidator,
}

fn non_zero(name: &'static str, value: u64) -> Result<(), ParamError> {
    if value == 0 {
        return Err(ParamError { name, value });
    }
    Ok(())
}

fn validate_max_memo_characters(v: u64) -> Result<(), ParamError> {
    non_zero("max memo characters", v)
}

fn validate_tx_sig_limit(v: u64) -> Result<(), ParamError> {
    non_zero("tx signature limit", v)
}

fn validate_tx_size_cost_per_byte(v: u64) -> Result<(), ParamError> {
    non_zero("tx size cost per byte", v)
}

fn validate_sig_verify_cost_ed25519(v: u64) -> Result<(), ParamError> {
    non_zero("ED25519 signature verification cost", v)
}

fn validate_sig_verify_cost_secp256k1(v: u64) -> Result<(), ParamError> {
    non_zero("SECP256k1 signature verification cost", v)
}

fn validate_sig_verify_cost_sm2(v: u64) -> Result<(), ParamError> {
    non_zero("Sm2 signature verification cost", v)
}

/// Auth module parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthParams {
    /// Maximum memo length in characters.
    pub max_memo_characters: u64,
    /// Maximum signatures per transaction.
    pub tx_sig_limit: u64,
    /// Gas per transaction byte.
    pub tx_size_cost_per_byte: u64,
    /// Gas per Ed25519 signature verification.
    pub sig_verify_cost_ed25519: u64,
    /// Gas per secp256k1 signature verification.
    pub sig_verify_cost_secp256k1: u64,
    /// Gas per SM2 signature verification.
    pub sig_verify_cost_sm2: u64,
}

impl Default for AuthParams {
    fn default() -> Self {
        Self {
            max_memo_characters: DEFAULT_MAX_MEMO_CHARACTERS,
            tx_sig_limit: DEFAULT_TX_SIG_LIMIT,
            tx_size_cost_per_byte: DEFAULT_TX_SIZE_COST_PER_BYTE,
            sig_verify_cost_ed25519: DEFAULT_SIG_VERIFY_COST_ED25519,
            sig_verify_cost_secp256k1: DEFAULT_SIG_VERIFY_COST_SECP256K1,
            sig_verify_cost_sm2: DEFAULT_SIG_VERIFY_COST_SM2,
        }
    }
}

impl AuthParams {
    /// Registry entries in store order.
    pub fn param_set_pairs(&mut self) -> Vec<ParamSetPair<'_>> {
        vec![
            ParamSetPair {
                key: KEY_MAX_MEMO_CHARACTERS,
                value: &mut self.max_memo_characters,
                validator: validate_max_memo_characters,
            },
            ParamSetPair {
                key: KEY_TX_SIG_LIMIT,
                value: &mut self.tx_sig_limit,
                validator: validate_tx_sig_limit,
            },
            ParamSetPair {
                key: KEY_TX_SIZE_COST_PER_BYTE,
                value: &mut self.tx_size_cost_per_byte,
                validator: validate_tx_size_cost_per_byte,
            },
            ParamSetPair {
                key: KEY_SIG_VERIFY_COST_ED25519,
                value: &mut self.sig_verify_cost_ed25519,
                validator: validate_sig_verify_cost_ed25519,
            },
            ParamSetPair {
                key: KEY_SIG_VERIFY_COST_SECP256K1,
                value: &mut self.sig_verify_cost_secp256k1,
                validator: validate_sig_verify_cost_secp256k1,
            },
            ParamSetPair {
                key: KEY_SIG_VERIFY_COST_SM2,
                value: &mut self.sig_verify_cost_sm2,
                validator: validate_sig_verify_cost_sm2,
            },
        ]
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<(), ParamError> {
        validate_tx_sig_limit(self.tx_sig_limit)?;
        validate_sig_verify_cost_ed25519(self.sig_verify_cost_ed25519)?;
        validate_sig_verify_cost_secp256k1(self.sig_verify_cost_secp256k1)?;
        validate_sig_verify_cost_sm2(self.sig_verify_cost_sm2)?;
        validate_max_memo_characters(self.max_memo_characters)?;
        validate_tx_size_cost_per_byte(self.tx_size_cost_per_byte)?;
        Ok(())
    }

    /// Gas for a secp256r1 verification, discounted to half of secp256k1.
    pub fn sig_verify_cost_secp256r1(&self) -> u64 {
        self.sig_verify_cost_secp256k1 / 2
    }
}

impl fmt::Display for AuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "max_memo_characters: {}", self.max_memo_characters)?;
        writeln!(f, "tx_sig_limit: {}", self.tx_sig_limit)?;
        writeln!(f, "tx_size_cost_per_byte: {}", self.tx_size_cost_per_byte)?;
        writeln!(f, "sig_verify_cost_ed25519: {}", self.sig_verify_cost_ed25519)?;
        writeln!(f, "sig_verify_cost_secp256k1: {}", self.sig_verify_cost_secp256k1)?;
        writeln!(f, "sig_verify_cost_sm2: {}", self.sig_verify_cost_sm2)
    }
}
