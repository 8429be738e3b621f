//! Base58Check subcommands.

use clap::{Args, Subcommand};

/// Hex <-> Base58Check conversion
#[derive(Subcommand, Debug)]
pub enum Base58Command {
    /// Encode a hex payload as Base58Check
    Encode(Base58EncodeArgs),
    /// Decode Base58Check text to a hex payload
    Decode(Base58DecodeArgs),
}

/// Arguments for `base58 encode`
#[derive(Args, Debug)]
pub struct Base58EncodeArgs {
    /// Hex payload, with or without 0x
    #[arg(value_name = "HEX")]
    pub hex: String,

    /// Version byte to prepend before the payload
    #[arg(long, value_name = "BYTE")]
    pub version_byte: Option<u8>,
}

/// Arguments for `base58 decode`
#[derive(Args, Debug)]
pub struct Base58DecodeArgs {
    /// Base58Check text
    #[arg(value_name = "STRING")]
    pub input: String,

    /// Expected version byte; stripped from the output when given
    #[arg(long, value_name = "BYTE")]
    pub version_byte: Option<u8>,
}
