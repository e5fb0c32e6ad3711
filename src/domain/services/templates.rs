//! Generated file templates
//!
//! Renders the nginx site and the systemd unit. Rendering is deterministic:
//! equal inputs give byte-identical output, which the reconcile policy
//! relies on when comparing hashes.

use std::fmt::Write as _;
use std::path::PathBuf;

/// Inputs for the nginx site file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySite {
    pub server_name: String,
    pub listen_port: u16,
    /// Directory of the built single-page app
    pub static_root: PathBuf,
    /// URL prefix routed to the backend, e.g. `/api`
    pub api_prefix: String,
    pub backend_host: String,
    pub backend_port: u16,
}

impl ProxySite {
    /// The prefix as an nginx location (`/api/`)
    pub fn location(&self) -> String {
        let trimmed = self.api_prefix.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        }
    }
}

/// Inputs for the backend systemd unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUnit {
    pub description: String,
    pub user: String,
    pub group: String,
    pub working_dir: PathBuf,
    pub venv_dir: PathBuf,
    /// ASGI application, e.g. `main:app`
    pub app_module: String,
    pub host: String,
    pub port: u16,
    pub restart_sec: u32,
    /// Units this one is ordered after, besides `network.target`
    pub after: Vec<String>,
}

pub fn render_proxy_site(site: &ProxySite) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "server {{");
    let _ = writeln!(out, "    listen {};", site.listen_port);
    let _ = writeln!(out, "    listen [::]:{};", site.listen_port);
    let _ = writeln!(out, "    server_name {};", site.server_name);
    out.push('\n');
    let _ = writeln!(out, "    root {};", site.static_root.display());
    let _ = writeln!(out, "    index index.html;");
    out.push('\n');
    let _ = writeln!(out, "    location / {{");
    let _ = writeln!(out, "        try_files $uri $uri/ /index.html;");
    let _ = writeln!(out, "    }}");
    out.push('\n');
    let _ = writeln!(out, "    location {} {{", site.location());
    let _ = writeln!(
        out,
        "        proxy_pass http://{}:{}/;",
        site.backend_host, site.backend_port
    );
    let _ = writeln!(out, "        proxy_http_version 1.1;");
    let _ = writeln!(out, "        proxy_set_header Upgrade $http_upgrade;");
    let _ = writeln!(out, "        proxy_set_header Connection \"upgrade\";");
    let _ = writeln!(out, "        proxy_set_header Host $host;");
    let _ = writeln!(out, "        proxy_set_header X-Real-IP $remote_addr;");
    let _ = writeln!(
        out,
        "        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;"
    );
    let _ = writeln!(out, "        proxy_set_header X-Forwarded-Proto $scheme;");
    let _ = writeln!(out, "        proxy_read_timeout 86400;");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    out
}

pub fn render_backend_unit(unit: &BackendUnit) -> String {
    let venv_bin = unit.venv_dir.join("bin");

    let mut after = vec!["network.target".to_string()];
    after.extend(unit.after.iter().cloned());

    let mut out = String::new();
    let _ = writeln!(out, "[Unit]");
    let _ = writeln!(out, "Description={}", unit.description);
    let _ = writeln!(out, "After={}", after.join(" "));
    if !unit.after.is_empty() {
        let _ = writeln!(out, "Wants={}", unit.after.join(" "));
    }
    out.push('\n');
    let _ = writeln!(out, "[Service]");
    let _ = writeln!(out, "Type=simple");
    let _ = writeln!(out, "User={}", unit.user);
    let _ = writeln!(out, "Group={}", unit.group);
    let _ = writeln!(out, "WorkingDirectory={}", unit.working_dir.display());
    let _ = writeln!(out, "Environment=\"PATH={}\"", venv_bin.display());
    let _ = writeln!(out, "Environment=\"PYTHONUNBUFFERED=1\"");
    let _ = writeln!(
        out,
        "ExecStart={} {} --host {} --port {}",
        venv_bin.join("uvicorn").display(),
        unit.app_module,
        unit.host,
        unit.port
    );
    let _ = writeln!(out, "Restart=always");
    let _ = writeln!(out, "RestartSec={}", unit.restart_sec);
    let _ = writeln!(out, "StandardOutput=journal");
    let _ = writeln!(out, "StandardError=journal");
    out.push('\n');
    let _ = writeln!(out, "[Install]");
    let _ = writeln!(out, "WantedBy=multi-user.target");
    out
}
