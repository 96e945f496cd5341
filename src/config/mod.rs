use alloc::string::String;

pub const DEFAULT_GPSD_PORT: u16 = 2947;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self { host: "localhost".into(), port: DEFAULT_GPSD_PORT }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Stamp geodetic fixes with the receiver's fix time instead of wall clock
    pub use_gps_time: bool,
    /// Treat a fix with unknown horizontal variance as no fix
    pub check_fix_by_variance: bool,
    pub frame_id: String,
    pub gpsd: Server,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_gps_time: true,
            check_fix_by_variance: true,
            frame_id: "gps".into(),
            gpsd: Server::default(),
        }
    }
}

mod test {
    #[test]
    fn test_default() {
        use super::{Config, DEFAULT_GPSD_PORT};

        let config = Config::default();
        assert!(config.use_gps_time);
        assert!(config.check_fix_by_variance);
        assert_eq!(config.frame_id, "gps");
        assert_eq!(config.gpsd.host, "localhost");
        assert_eq!(config.gpsd.port, DEFAULT_GPSD_PORT);
    }

    #[test]
    fn test_deserialize_partial() {
        use serde_json::json;

        use super::Config;

        let value = json!({
            "use-gps-time": false,
            "frame-id": "gnss_link",
            "gpsd": {"port": 3000},
        });
        let config: Config = serde_json::from_value(value).unwrap();
        assert!(!config.use_gps_time);
        assert!(config.check_fix_by_variance);
        assert_eq!(config.frame_id, "gnss_link");
        assert_eq!(config.gpsd.host, "localhost");
        assert_eq!(config.gpsd.port, 3000);
    }

    #[test]
    fn test_deserialize_server() {
        use serde_json::json;

        use super::{Config, Server};

        let value = json!({"gpsd": {"host": "gps.local", "port": 2948}});
        let config: Config = serde_json::from_value(value).unwrap();
        assert_eq!(config.gpsd, Server { host: "gps.local".into(), port: 2948 });
        assert_eq!(config.frame_id, "gps");
    }

    #[test]
    fn test_serialize() {
        use serde_json::json;

        use super::Config;

        let expected = json!({
            "use-gps-time": true,
            "check-fix-by-variance": true,
            "frame-id": "gps",
            "gpsd": {"host": "localhost", "port": 2947},
        });
        assert_eq!(expected, serde_json::to_value(&Config::default()).unwrap());
    }
}
