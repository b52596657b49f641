use dsn::DSN;
use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use std::path::PathBuf;
use std::str::FromStr;

/// TLS configuration for the MySQL connection
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub ca: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

/// TLS/SSL mode for database connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// No TLS encryption
    #[default]
    Disable,
    /// TLS required, but no certificate verification
    Require,
    /// Verify server certificate against CA
    VerifyCA,
    /// Verify certificate and hostname
    VerifyFull,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" | "disabled" => Ok(Self::Disable),
            "require" | "required" => Ok(Self::Require),
            "verify-ca" | "verify_ca" => Ok(Self::VerifyCA),
            "verify-full" | "verify_identity" => Ok(Self::VerifyFull),
            _ => Err(format!("Invalid TLS mode: {s}")),
        }
    }
}

impl TlsMode {
    /// Check if TLS is enabled
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disable)
    }

    /// `MySQL` ssl-mode equivalent
    #[must_use]
    pub const fn mysql_ssl_mode(&self) -> MySqlSslMode {
        match self {
            Self::Disable => MySqlSslMode::Disabled,
            Self::Require => MySqlSslMode::Required,
            Self::VerifyCA => MySqlSslMode::VerifyCa,
            Self::VerifyFull => MySqlSslMode::VerifyIdentity,
        }
    }
}

impl TlsConfig {
    /// Extract TLS configuration from DSN query parameters
    ///
    /// Supports both MySQL-style and PostgreSQL-style parameter names:
    /// - ssl-mode, sslmode: disable|require|verify-ca|verify-full
    /// - ssl-ca, sslca, sslrootcert: Path to CA certificate
    /// - ssl-cert, sslcert: Path to client certificate
    /// - ssl-key, sslkey: Path to client private key
    ///
    /// An unknown mode falls back to `disable`.
    #[must_use]
    pub fn from_dsn(dsn: &DSN) -> Self {
        let mode = dsn
            .params
            .get("ssl-mode")
            .or_else(|| dsn.params.get("sslmode"))
            .and_then(|m| m.parse::<TlsMode>().ok())
            .unwrap_or_default();

        let ca = dsn
            .params
            .get("ssl-ca")
            .or_else(|| dsn.params.get("sslca"))
            .or_else(|| dsn.params.get("sslrootcert"))
            .map(PathBuf::from);

        let cert = dsn
            .params
            .get("ssl-cert")
            .or_else(|| dsn.params.get("sslcert"))
            .map(PathBuf::from);

        let key = dsn
            .params
            .get("ssl-key")
            .or_else(|| dsn.params.get("sslkey"))
            .map(PathBuf::from);

        Self {
            mode,
            ca,
            cert,
            key,
        }
    }

    /// Apply the TLS settings to `MySQL` connect options
    #[must_use]
    pub fn apply(&self, options: MySqlConnectOptions) -> MySqlConnectOptions {
        let mut options = options.ssl_mode(self.mode.mysql_ssl_mode());

        // a CA only matters when the server certificate is verified
        if matches!(self.mode, TlsMode::VerifyCA | TlsMode::VerifyFull)
            && let Some(ca_path) = &self.ca
        {
            options = options.ssl_ca(ca_path);
        }

        if let (Some(cert_path), Some(key_path)) = (&self.cert, &self.key) {
            options = options.ssl_client_cert(cert_path).ssl_client_key(key_path);
        }

        options
    }
}
