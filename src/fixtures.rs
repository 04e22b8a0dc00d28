#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    crate::config! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct TlsConfig {
            /// Serve over TLS.
            #[conf(key = "enabled", default = "true")]
            pub enabled: bool,

            /// Certificate path.
            #[conf(key = "cert")]
            pub cert: String,
        }
    }

    crate::config! {
        /// A plain nested shape.
        #[derive(Debug, Clone, PartialEq)]
        pub struct HttpConfig {
            #[conf(key = "address", default = "127.0.0.1")]
            pub address: String,

            #[conf(key = "port", default = "80")]
            pub port: i64,

            #[conf(key = "tls")]
            pub tls: TlsConfig,
        }
    }

    crate::config! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct OptionalHttp {
            #[conf(key = "address", default = "127.0.0.1")]
            pub address: String,

            #[conf(key = "port", default = "80")]
            pub port: Option<i64>,

            #[conf(key = "tls")]
            pub tls: TlsConfig,
        }
    }

    crate::config! {
        /// The same settings reached through optional fields.
        #[derive(Debug, Clone, PartialEq)]
        pub struct OptionalHttpConfig {
            #[conf(key = "http")]
            pub http: Option<OptionalHttp>,

            #[conf(key = "name", default = "svc")]
            pub name: Option<String>,

            #[conf(key = "retries")]
            pub retries: Option<u32>,
        }
    }

    crate::config! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct DashConfig {
            #[conf(key = "name", default = "-")]
            pub name: String,

            #[conf(key = "count", default = "-")]
            pub count: i64,

            #[conf(key = "enabled", default = "-")]
            pub enabled: bool,
        }
    }

    crate::config! {
        /// Supported and unsupported default kinds side by side.
        #[derive(Debug, Clone, PartialEq)]
        pub struct MixedConfig {
            #[conf(key = "ratio", default = "1.5")]
            pub ratio: f64,

            #[conf(key = "tags", default = "a,b")]
            pub tags: Vec<String>,

            #[conf(key = "labels")]
            pub labels: HashMap<String, String>,

            #[conf(key = "workers", default = "abc")]
            pub workers: i32,

            #[conf(key = "name", default = "mixed")]
            pub name: String,

            #[conf(key = "-", default = "hidden")]
            pub secret: String,

            pub internal: String,
        }
    }

    crate::config! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct EnvSection {
            #[conf(key = "env", default = "test")]
            pub env: String,
        }
    }

    crate::config! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct EnvConfig {
            #[conf(key = "test")]
            pub test: EnvSection,
        }
    }

    #[test]
    fn fixtures_describe_themselves() {
        use crate::meta::Config;

        assert_eq!(HttpConfig::meta().fields.len(), 3);
        assert_eq!(MixedConfig::meta().fields.len(), 5);
        assert_eq!(EnvConfig::meta().fields[0].key, "test");
    }
}
