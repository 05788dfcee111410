use serde::{Deserialize, Serialize};
use serde_kitty::{from_file, from_str, section, Config, Error, Section, Value};
use std::io::Write;

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct WebConf {
    ip: String,
    mac: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct ClusterConf {
    #[serde(rename = "addr")]
    ipaddr: String,
    #[serde(rename = "wgh", default)]
    weight: i32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
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

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct MacConf {
    mac1: Option<String>,
    mac2: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct MonitorConf {
    enabled: bool,
    #[serde(rename = "ip")]
    addr: String,
    #[serde(rename = "MAC")]
    macs: MacConf,
    port: i32,
    #[serde(rename = "clust")]
    cluster: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
struct Conf {
    #[serde(rename = "host")]
    hostname: String,
    #[serde(rename = "ipaddr")]
    addr: String,
    #[serde(rename = "port")]
    port_num: i32,
    #[serde(rename = "compression")]
    status: String,
    height: Vec<f32>,
    active: bool,
    #[serde(rename = "cluster")]
    clusters: Vec<String>,
    #[serde(rename = "distance")]
    dist: i32,
    #[serde(rename = "temprature")]
    temp: f64,
    #[serde(rename = "top_level")]
    level: Option<i32>,
    #[serde(rename = "max_conn")]
    num_conn: u32,
    #[serde(rename = "port_enable")]
    port_sw: bool,
    order: Vec<i64>,
    monitor: MonitorConf,
    portal: PortalConf,
}

const FULL_CONF: &str = "\
# global options
host = example.com
ipaddr = 10.1.1.1
port = 43
compression = on
height = 8848.996, 1.5
active = true
cluster = abc, 192.168.1.10, 172.10.156.23

temprature = 36.8
top_level = 3
max_conn = 1024
port_enable = T
order = 1, 2, 3, 110

[monitor]
 enabled = false
 ip = 127.0.0.1
 port = 9000
 clust = a, b
 [MAC]
  mac1 = 00:11:22
  mac2 = 33:44:55

[portal]
 enabled = true
 ip = 192.168.0.1
 port = 8080
 connecttimeout = 30
 calltimeout = 60
 [[cluster]]
  addr = 10.0.0.1
  wgh = 3
 [[cluster]]
  addr = 10.0.0.2
  wgh = 5
 [web]
  ip = 172.16.0.1
  mac = aa:bb:cc
";

#[test]
fn test_full_config_unmarshal() {
    let mut conf = Conf {
        dist: 90,
        portal: PortalConf {
            web1: Some(WebConf::default()),
            ..Default::default()
        },
        ..Default::default()
    };

    let config = Config::from_str(FULL_CONF).unwrap();
    config.unmarshal(&mut conf).unwrap();

    assert_eq!(conf.hostname, "example.com");
    assert_eq!(conf.addr, "10.1.1.1");
    assert_eq!(conf.port_num, 43);
    assert_eq!(conf.status, "on");
    assert_eq!(conf.height, vec![8848.996, 1.5]);
    assert!(conf.active);
    assert_eq!(conf.clusters, vec!["abc", "192.168.1.10", "172.10.156.23"]);
    assert_eq!(conf.dist, 90);
    assert_eq!(conf.temp, 36.8);
    assert_eq!(conf.level, Some(3));
    assert_eq!(conf.num_conn, 1024);
    assert!(conf.port_sw);
    assert_eq!(conf.order, vec![1, 2, 3, 110]);

    assert!(!conf.monitor.enabled);
    assert_eq!(conf.monitor.addr, "127.0.0.1");
    assert_eq!(conf.monitor.port, 9000);
    assert_eq!(conf.monitor.cluster, vec!["a", "b"]);
    assert_eq!(conf.monitor.macs.mac1.as_deref(), Some("00:11:22"));
    assert_eq!(conf.monitor.macs.mac2, "33:44:55");

    let portal = &conf.portal;
    assert!(portal.enabled);
    assert_eq!(portal.ip, "192.168.0.1");
    assert_eq!(portal.port, 8080);
    assert_eq!(portal.conn_timeout, 30);
    assert_eq!(portal.call_timeout, 60);
    assert_eq!(
        portal.clusters,
        vec![
            ClusterConf {
                ipaddr: "10.0.0.1".to_string(),
                weight: 3
            },
            ClusterConf {
                ipaddr: "10.0.0.2".to_string(),
                weight: 5
            },
        ]
    );
    assert_eq!(portal.web.ip, "172.16.0.1");
    assert_eq!(portal.web.mac, "aa:bb:cc");
    assert_eq!(portal.web1, Some(WebConf::default()));
}

#[test]
fn test_full_config_tree_shape() {
    let config = Config::from_str(FULL_CONF).unwrap();
    let root = config.sections();

    assert_eq!(root.get("port"), Some(&Value::from("43")));
    assert_eq!(root.lookup("monitor.MAC.mac2"), Some(&Value::from("33:44:55")));
    assert_eq!(root.lookup("portal.web.ip"), Some(&Value::from("172.16.0.1")));

    let clusters = root.lookup("portal.cluster").and_then(Value::as_list).unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[1].get("wgh"), Some(&Value::from("5")));

    // `[web]` closed the last `[[cluster]]` entry.
    assert!(!clusters[1].contains_key("web"));
}

#[test]
fn test_single_level_assignments() {
    let config = Config::from_str("host = example.com\nport   =   43  \ncompression=on\n").unwrap();
    assert_eq!(
        config.sections(),
        &section! {
            "host" => "example.com",
            "port" => "43",
            "compression" => "on",
        }
    );
}

#[test]
fn test_nested_section() {
    let config = Config::from_str("[a]\n k = v\n").unwrap();
    assert_eq!(config.sections(), &section! { "a" => { "k" => "v" } });
}

#[test]
fn test_list_of_sections_preserves_order() {
    let config = Config::from_str("[[a]]\nk=1\n[[a]]\nk=2\n").unwrap();
    assert_eq!(
        config.sections(),
        &section! { "a" => [{ "k" => "1" }, { "k" => "2" }] }
    );
}

#[test]
fn test_duplicate_definitions_name_the_key() {
    let err = Config::from_str("[a]\n[a]\n").unwrap_err();
    assert!(matches!(err, Error::Duplicate { ref key, line: 2, .. } if key == "a"));
    assert!(err.to_string().contains("`a`"));

    let err = Config::from_str("port = 1\nport = 2\n").unwrap_err();
    assert!(matches!(err, Error::Duplicate { ref key, line: 2, .. } if key == "port"));

    let err = Config::from_str("[a]\n x = 1\n x = 2\n").unwrap_err();
    assert!(matches!(err, Error::Duplicate { ref key, line: 3, .. } if key == "x"));
}

#[test]
fn test_same_key_in_different_sections_is_allowed() {
    let config = Config::from_str("ip = 1\n[a]\n ip = 2\n[b]\n ip = 3\n").unwrap();
    assert_eq!(config.sections().lookup("a.ip"), Some(&Value::from("2")));
    assert_eq!(config.sections().lookup("b.ip"), Some(&Value::from("3")));
}

#[test]
fn test_skipped_indentation_level() {
    let err = Config::from_str("[a]\n   k = v\n").unwrap_err();
    assert!(matches!(err, Error::Indentation { line: 2, .. }));
    assert_eq!(err.line(), Some(2));

    let err = Config::from_str(" k = v\n").unwrap_err();
    assert!(matches!(err, Error::Indentation { line: 1, .. }));
}

#[test]
fn test_shallower_line_discards_deeper_branch() {
    let text = "\
[a]
 [b]
  x = 1
 y = 2
z = 3
";
    let config = Config::from_str(text).unwrap();
    assert_eq!(
        config.sections(),
        &section! {
            "a" => { "b" => { "x" => "1" }, "y" => "2" },
            "z" => "3",
        }
    );

    let config = Config::from_str("[a]\n [b]\n [c]\n  k = v\n").unwrap();
    assert_eq!(
        config.sections(),
        &section! { "a" => { "b" => {}, "c" => { "k" => "v" } } }
    );

    // Opening `[d]` closed `[a]` and `[b]`.
    let err = Config::from_str("[a]\n [b]\n[d]\n  x = 1\n").unwrap_err();
    assert!(matches!(err, Error::Indentation { line: 4, .. }));
}

#[test]
fn test_record_mapping_by_tag() {
    #[derive(Deserialize)]
    struct Server {
        host: String,
        port: i32,
    }

    let server: Server = from_str("host = x\nport = 8080\n").unwrap();
    assert_eq!(server.host, "x");
    assert_eq!(server.port, 8080);
}

#[test]
fn test_absent_key_keeps_prior_value() {
    #[derive(Serialize, Deserialize, Default)]
    struct Server {
        host: String,
        port: i32,
    }

    let mut server = Server {
        host: "before".to_string(),
        port: 8080,
    };
    Config::from_str("host = after\n")
        .unwrap()
        .unmarshal(&mut server)
        .unwrap();
    assert_eq!(server.host, "after");
    assert_eq!(server.port, 8080);
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Listener {
    port: i32,
    group: Vec<String>,
}

#[test]
fn test_absent_sequence_keeps_delimiter_in_element() {
    let mut listener = Listener {
        port: 42,
        group: vec!["a,b".to_string()],
    };
    Config::from_str("port = 43\n")
        .unwrap()
        .unmarshal(&mut listener)
        .unwrap();
    assert_eq!(
        listener,
        Listener {
            port: 43,
            group: vec!["a,b".to_string()],
        }
    );
}

#[test]
fn test_absent_sequence_keeps_surrounding_whitespace() {
    let mut listener = Listener {
        port: 42,
        group: vec![" x ".to_string(), String::new()],
    };
    Config::from_str("port = 43\n")
        .unwrap()
        .unmarshal(&mut listener)
        .unwrap();
    assert_eq!(listener.port, 43);
    assert_eq!(listener.group, vec![" x ".to_string(), String::new()]);
}

#[test]
fn test_present_sequence_replaces_preset() {
    let mut listener = Listener {
        port: 42,
        group: vec!["a,b".to_string()],
    };
    Config::from_str("group = c, d\n")
        .unwrap()
        .unmarshal(&mut listener)
        .unwrap();
    assert_eq!(listener.port, 42);
    assert_eq!(listener.group, vec!["c", "d"]);
}

#[test]
fn test_list_elements_need_serde_default_for_missing_keys() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Strict {
        addr: String,
        weight: i32,
    }

    #[derive(Deserialize, Debug, Default)]
    #[serde(default)]
    struct Lenient {
        addr: String,
        weight: i32,
    }

    #[derive(Deserialize, Debug)]
    struct Nodes<T> {
        node: Vec<T>,
    }

    let input = "[[node]]\n addr = a\n";

    let err = from_str::<Nodes<Strict>>(input).unwrap_err();
    match &err {
        Error::Field { path, .. } => assert_eq!(path, "node.0"),
        other => panic!("expected a field error, got {:?}", other),
    }
    assert!(err.root_cause().to_string().contains("weight"));

    let nodes: Nodes<Lenient> = from_str(input).unwrap();
    assert_eq!(nodes.node[0].addr, "a");
    assert_eq!(nodes.node[0].weight, 0);
}

#[test]
fn test_scalar_sequence_is_split_and_trimmed() {
    #[derive(Deserialize)]
    struct Groups {
        group: Vec<String>,
    }

    let groups: Groups = from_str("group = a, b , c\n").unwrap();
    assert_eq!(groups.group, vec!["a", "b", "c"]);
}

#[test]
fn test_shape_mismatches() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Node {
        addr: String,
    }

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Nodes {
        cluster: Vec<Node>,
    }

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Host {
        host: String,
    }

    let err = from_str::<Nodes>("cluster = a, b\n").unwrap_err();
    assert!(matches!(err.root_cause(), Error::TypeMismatch { .. }));

    let err = from_str::<Host>("[[host]]\n addr = a\n").unwrap_err();
    assert!(matches!(err.root_cause(), Error::TypeMismatch { .. }));

    let err = from_str::<Host>("[host]\n addr = a\n").unwrap_err();
    assert!(matches!(err.root_cause(), Error::TypeMismatch { .. }));
}

#[test]
fn test_conversion_error_names_the_field() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Portal {
        port: i32,
    }

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Conf {
        portal: Portal,
    }

    let err = from_str::<Conf>("[portal]\n port = eighty\n").unwrap_err();
    match &err {
        Error::Field { path, source } => {
            assert_eq!(path, "portal.port");
            assert!(matches!(**source, Error::Conversion { .. }));
        }
        other => panic!("Expected field error, got {:?}", other),
    }
    assert!(err.to_string().contains("portal.port"));
}

#[test]
fn test_reparse_is_idempotent() {
    let first = Config::from_str(FULL_CONF).unwrap();
    let second = Config::from_str(FULL_CONF).unwrap();
    assert_eq!(first.sections(), second.sections());
    assert_eq!(first, second);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL_CONF.as_bytes()).unwrap();

    let conf: Conf = from_file(file.path()).unwrap();
    assert_eq!(conf.hostname, "example.com");
    assert_eq!(conf.portal.clusters.len(), 2);
    assert_eq!(conf.dist, 0);

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config, Config::from_str(FULL_CONF).unwrap());
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.conf");

    let err = Config::from_file(&path).unwrap_err();
    match err {
        Error::Io(msg) => assert!(msg.contains("absent.conf")),
        other => panic!("Expected IO error, got {:?}", other),
    }
}

#[test]
fn test_into_section_and_json_dump() {
    let section: Section = Config::from_str("a = 1\n[b]\n c = 2\n")
        .unwrap()
        .into_section();
    let json = serde_json::to_value(&section).unwrap();
    assert_eq!(json, serde_json::json!({ "a": "1", "b": { "c": "2" } }));
}

#[test]
fn test_top_level_must_be_a_record() {
    let err = from_str::<i32>("a = 1\n").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));

    let mut n = 5;
    let err = Config::from_str("a = 1\n").unwrap().unmarshal(&mut n).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert_eq!(n, 5);
}
