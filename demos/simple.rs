//! Parsing kitty text straight into a struct.
//!
//! Run with: cargo run --example simple

use serde::Deserialize;
use serde_kitty::from_str;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct ConfigOption {
    #[serde(rename = "host")]
    hostname: String,
    #[serde(rename = "ipaddr")]
    addr: String,
    #[serde(rename = "port")]
    port_num: i32,
    height: Vec<f32>,
    active: bool,
    #[serde(rename = "cluster")]
    clusters: Vec<String>,
    #[serde(rename = "temprature")]
    temp: f64,
    top_level: Option<i32>,
    order: Vec<i32>,
}

const CONFIG: &str = "
#comment like this
host = example.com
ipaddr = 10.1.1.1

port = 43

#comment like this

active = true
cluster = abc, 192.168.1.10, 172.10.156.23
order = 1, 2, 3, 110
temprature = 36.8
height = 8848.996
";

fn main() -> Result<(), Box<dyn Error>> {
    let option: ConfigOption = from_str(CONFIG)?;

    println!("Hostname: {}", option.hostname);
    println!("Addr: {}", option.addr);
    println!("Port: {}", option.port_num);
    println!("Height: {:?}", option.height);
    println!("Active: {}", option.active);
    println!("Clusters: {:?}", option.clusters);
    println!("Temp: {}", option.temp);
    println!("TopLevel: {:?}", option.top_level);
    println!("Order: {:?}", option.order);

    Ok(())
}
