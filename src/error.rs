use std::net::{AddrParseError, Ipv4Addr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PtbError {
    #[error("endereço IPv4 inválido: {input:?}")]
    InvalidAddress {
        input: String,
        #[source]
        source: AddrParseError,
    },
    #[error("falha ao transmitir o pacote: {0}")]
    TransmissionFailed(#[source] std::io::Error),
}

/// Parser de endereço IPv4 em notação dotted-quad.
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr, PtbError> {
    input
        .trim()
        .parse()
        .map_err(|source| PtbError::InvalidAddress {
            input: input.to_string(),
            source,
        })
}
