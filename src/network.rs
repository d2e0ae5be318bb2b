use crate::consts::NETWORK_ID_WILDCARD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    net::IpAddr,
    num::NonZeroU16,
    str::FromStr,
};
use thiserror::Error;
use url::{Host, Url};

/// Named connection parameters for reaching a blockchain node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkProfile {
    /// Key of the profile under `networks`. Filled in on load.
    #[serde(skip)]
    pub name: String,
    #[serde(deserialize_with = "deserialize_host")]
    pub host: String,
    pub port: Port,
    pub network_id: NetworkId,
}

impl NetworkProfile {
    /// `http://<host>:<port>` of the node.
    pub fn rpc_url(&self) -> Result<Url, url::ParseError> {
        let host = parse_host(&self.host)?;
        Url::parse(&format!("http://{}:{}", host, self.port))
    }

    pub fn accepts(&self, network_id: u64) -> bool {
        match self.network_id {
            NetworkId::Any => true,
            NetworkId::Id(id) => id == network_id,
        }
    }
}

/// TCP port in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Port(NonZeroU16);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("port must be within 1..=65535, got {0}")]
pub struct PortOutOfRange(i64);

impl Port {
    pub fn new(port: u16) -> Option<Self> {
        NonZeroU16::new(port).map(Self)
    }

    pub fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<i64> for Port {
    type Error = PortOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(PortOutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.get()
    }
}

impl Display for Port {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the network a profile may be deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkId {
    /// `"*"`, matches any network.
    Any,
    Id(u64),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("network_id must be \"*\" or an unsigned integer, got {0:?}")]
pub struct InvalidNetworkId(String);

impl FromStr for NetworkId {
    type Err = InvalidNetworkId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NETWORK_ID_WILDCARD {
            return Ok(Self::Any);
        }
        s.parse()
            .map(Self::Id)
            .map_err(|_| InvalidNetworkId(s.to_string()))
    }
}

impl Display for NetworkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(NETWORK_ID_WILDCARD),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NetworkIdVisitor;

        impl<'de> de::Visitor<'de> for NetworkIdVisitor {
            type Value = NetworkId;

            fn expecting(&self, f: &mut Formatter) -> fmt::Result {
                f.write_str("\"*\" or an unsigned integer network id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(NetworkId::Id(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(NetworkId::Id)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NetworkIdVisitor)
    }
}

fn parse_host(host: &str) -> Result<Host, url::ParseError> {
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(addr)) => Ok(Host::Ipv4(addr)),
        Ok(IpAddr::V6(addr)) => Ok(Host::Ipv6(addr)),
        // WHATWG parsing accepts shorthand like `1.2.3`, which connects elsewhere
        Err(_) => match Host::parse(host)? {
            Host::Ipv4(_) => Err(url::ParseError::InvalidIpv4Address),
            host => Ok(host),
        },
    }
}

fn deserialize_host<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let host = String::deserialize(deserializer)?;
    parse_host(&host).map_err(|err| {
        <D::Error as de::Error>::custom(format!("invalid host {host:?}: {err}"))
    })?;
    Ok(host)
}

/// Deserializes `networks`, rejecting repeated and empty names.
pub(crate) fn deserialize_networks<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, NetworkProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NetworksVisitor;

    impl<'de> de::Visitor<'de> for NetworksVisitor {
        type Value = BTreeMap<String, NetworkProfile>;

        fn expecting(&self, f: &mut Formatter) -> fmt::Result {
            f.write_str("a map of network names to network profiles")
        }

        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut networks = BTreeMap::new();
            while let Some((name, mut profile)) = map.next_entry::<String, NetworkProfile>()? {
                if name.is_empty() {
                    return Err(de::Error::custom("network name must not be empty"));
                }
                if networks.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate network {name:?}")));
                }
                profile.name = name.clone();
                networks.insert(name, profile);
            }
            Ok(networks)
        }
    }

    deserializer.deserialize_map(NetworksVisitor)
}
