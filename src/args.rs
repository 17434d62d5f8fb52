use anyhow::{Context, Result};
use clap::Parser;
use std::net::Ipv4Addr;

use ptbrs::parse_ipv4;

/// MTU anunciado quando `-m` não é informado.
pub const DEFAULT_MTU: u16 = 200;

/// ptbrs: envia um ICMP "Packet Too Big" (type 3, code 4) forjado
#[derive(Parser, Debug)]
#[command(name = "ptbrs", version)]
pub struct Cli {
    /// Host de destino (IPv4)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Endereço de origem usado no cabeçalho IP e no bind do socket
    #[arg(short = 's', long = "source", value_name = "IPV4")]
    pub source: String,

    /// Next-Hop MTU anunciado (bytes). Não há validação de faixa.
    #[arg(short = 'm', long = "mtu", value_name = "BYTES", default_value_t = DEFAULT_MTU)]
    pub mtu: u16,

    /// Identificação IP fixa (por padrão é sorteada)
    #[arg(long = "id", value_name = "N")]
    pub id: Option<u16>,

    /// Semente do gerador da identificação, para execuções reproduzíveis
    #[arg(long = "seed", value_name = "N", conflicts_with = "id")]
    pub seed: Option<u64>,

    /// Monta e mostra o pacote sem abrir socket
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Verbosidade (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug)]
pub struct PtbArgs {
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
    pub mtu: u16,
    pub id: Option<u16>,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub verbose: u8,
}

pub fn parse() -> Result<PtbArgs> {
    resolve(Cli::parse())
}

fn resolve(cli: Cli) -> Result<PtbArgs> {
    let src = parse_ipv4(&cli.source).context("Endereço de origem inválido")?;
    let dst = parse_ipv4(&cli.target).context("Endereço de destino inválido")?;

    Ok(PtbArgs {
        src,
        dst,
        mtu: cli.mtu,
        id: cli.id,
        seed: cli.seed,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_from(argv: &[&str]) -> Result<PtbArgs> {
        resolve(Cli::try_parse_from(argv.iter().copied())?)
    }

    #[test]
    fn defaults() {
        let args = resolve_from(&["ptbrs", "-s", "172.20.10.2", "8.8.4.4"]).unwrap();
        assert_eq!(args.src, Ipv4Addr::new(172, 20, 10, 2));
        assert_eq!(args.dst, Ipv4Addr::new(8, 8, 4, 4));
        assert_eq!(args.mtu, DEFAULT_MTU);
        assert_eq!(args.id, None);
        assert!(!args.dry_run);
    }

    #[test]
    fn all_flags() {
        let args = resolve_from(&[
            "ptbrs", "--source", "10.0.0.1", "10.0.0.2", "-m", "68", "--id", "4660",
            "--dry-run", "-vv",
        ])
        .unwrap();
        assert_eq!(args.mtu, 68);
        assert_eq!(args.id, Some(0x1234));
        assert!(args.dry_run);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn tiny_mtu_is_accepted() {
        let args = resolve_from(&["ptbrs", "-s", "10.0.0.1", "10.0.0.2", "-m", "0"]).unwrap();
        assert_eq!(args.mtu, 0);
    }

    #[test]
    fn bad_address_is_reported() {
        let err = resolve_from(&["ptbrs", "-s", "10.0.0.1", "10.0.0"]).unwrap_err();
        let err = err.downcast_ref::<ptbrs::PtbError>().unwrap();
        assert!(matches!(err, ptbrs::PtbError::InvalidAddress { .. }));
    }

    #[test]
    fn mtu_out_of_u16_range_is_rejected() {
        assert!(Cli::try_parse_from(["ptbrs", "-s", "10.0.0.1", "10.0.0.2", "-m", "70000"]).is_err());
    }

    #[test]
    fn seed_conflicts_with_id() {
        assert!(
            Cli::try_parse_from(["ptbrs", "-s", "1.1.1.1", "2.2.2.2", "--id", "1", "--seed", "2"])
                .is_err()
        );
    }
}
