//! Filling a nested struct from a file while keeping preset defaults.
//!
//! Run with: cargo run --example nested_struct

use serde::{Deserialize, Serialize};
use serde_kitty::Config;
use std::error::Error;

#[derive(Debug, Default, Serialize, Deserialize)]
struct WebConf {
    ip: String,
    mac: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ClusterConf {
    #[serde(rename = "addr")]
    ipaddr: String,
    #[serde(rename = "wgh", default)]
    weight: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PortalConf {
    enabled: bool,
    ip: String,
    port: i32,
    #[serde(rename = "cluster")]
    clusters: Vec<ClusterConf>,
    #[serde(rename = "connecttimeout")]
    conn_timeout: i32,
    #[serde(rename = "calltimeout")]
    call_timeout: i32,
    web: WebConf,
    web1: Option<WebConf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MacConf {
    mac1: Option<String>,
    mac2: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MonitorConf {
    enabled: bool,
    ip: String,
    #[serde(rename = "MAC")]
    macs: MacConf,
    port: i32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Conf {
    #[serde(rename = "host")]
    hostname: String,
    #[serde(rename = "port")]
    port_num: i32,
    #[serde(rename = "compression")]
    status: String,
    #[serde(rename = "distance")]
    dist: i32,
    monitor: MonitorConf,
    portal: PortalConf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/test.conf");
    let config = Config::from_file(path)?;

    let mut conf = Conf {
        dist: 90,
        portal: PortalConf {
            call_timeout: 15,
            web1: Some(WebConf::default()),
            ..Default::default()
        },
        ..Default::default()
    };

    config.unmarshal(&mut conf)?;

    println!("{:#?}", conf);
    println!("distance kept its default: {}", conf.dist);
    println!("calltimeout kept its default: {}", conf.portal.call_timeout);

    Ok(())
}
