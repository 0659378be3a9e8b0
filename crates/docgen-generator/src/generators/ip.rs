//! IP address generators.

use crate::error::SynthesisError;
use crate::options::OptionReader;
use crate::registry::{FieldType, SynthesisContext};
use docgen_core::{tags, GeneratedValue, IndexFieldType, Options};
use rand::{Rng, RngCore};
use std::net::{Ipv4Addr, Ipv6Addr};

/// RFC 1918 private blocks as (network, prefix length).
const PRIVATE_V4_BLOCKS: [(Ipv4Addr, u32); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

/// Which part of the IPv4 space to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Any,
    Public,
    Private,
}

impl Visibility {
    /// Unrecognized or non-string values mean "any".
    pub fn from_option(value: Option<&serde_json::Value>) -> Self {
        let raw = match value {
            Some(serde_json::Value::String(s)) => s.to_lowercase(),
            _ => return Self::Any,
        };
        match raw.as_str() {
            "public" => Self::Public,
            "private" => Self::Private,
            _ => Self::Any,
        }
    }
}

/// Whether an address is routable on the public internet.
pub fn is_public_v4(addr: Ipv4Addr) -> bool {
    let [a, b, _, _] = addr.octets();
    !(addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_broadcast()
        || addr.is_documentation()
        || addr.is_unspecified()
        || addr.is_multicast()
        || a == 0
        || a >= 240
        || (a == 100 && (64..128).contains(&b)))
}

pub fn generate_ipv4<R: Rng + ?Sized>(rng: &mut R, visibility: Visibility) -> Ipv4Addr {
    match visibility {
        Visibility::Any => Ipv4Addr::from(rng.gen::<u32>()),
        Visibility::Private => {
            let (network, prefix) = PRIVATE_V4_BLOCKS[rng.gen_range(0..PRIVATE_V4_BLOCKS.len())];
            let host_mask = u32::MAX >> prefix;
            Ipv4Addr::from(u32::from(network) | (rng.gen::<u32>() & host_mask))
        }
        Visibility::Public => loop {
            let addr = Ipv4Addr::from(rng.gen::<u32>());
            if is_public_v4(addr) {
                break addr;
            }
        },
    }
}

pub fn generate_ipv6<R: Rng + ?Sized>(rng: &mut R) -> Ipv6Addr {
    Ipv6Addr::from(rng.gen::<u128>())
}

/// `ip`: `version` 4 (default) or 6; `visibility` public | private for v4.
pub struct IpType;

impl FieldType for IpType {
    fn tag(&self) -> &'static str {
        tags::IP
    }

    fn index_type(&self) -> IndexFieldType {
        IndexFieldType::Ip
    }

    fn generate(
        &self,
        options: &Options,
        _ctx: &SynthesisContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, SynthesisError> {
        let opts = OptionReader::new(self.tag(), options);
        let version = opts
            .int("version", 4)
            .map_err(|_| opts.invalid("version", "ip version must be 4 or 6"))?;

        let addr = match version {
            4 => {
                let visibility = Visibility::from_option(options.get("visibility"));
                generate_ipv4(rng, visibility).to_string()
            }
            6 => generate_ipv6(rng).to_string(),
            _ => return Err(opts.invalid("version", "ip version must be 4 or 6")),
        };
        Ok(GeneratedValue::String(addr))
    }
}
