//! Simulated Ubuntu 22.04 host (image without a preinstalled cluster)
//!
//! Commands change host state the way the real tools would, so a second
//! run observes what the first one did.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ringprov::domain::ports::{
    CommandError, CommandOutput, CommandRunner, CommandSpec, FileSystem, FsError, FsResult,
};

pub const PG_CONF: &str = "/etc/postgresql/14/main/postgresql.conf";
pub const PG_HBA: &str = "/etc/postgresql/14/main/pg_hba.conf";
pub const SITE: &str = "/etc/nginx/sites-available/ring";
pub const SITE_LINK: &str = "/etc/nginx/sites-enabled/ring";
pub const DEFAULT_SITE_LINK: &str = "/etc/nginx/sites-enabled/default";
pub const UNIT: &str = "/etc/systemd/system/ring-backend.service";
pub const STATE: &str = "/var/lib/ringprov/state.toml";

const STOCK_PG_CONF: &str = "\
# PostgreSQL configuration file
data_directory = '/var/lib/postgresql/14/main'
port = 5432
#listen_addresses = 'localhost'\t# what IP address(es) to listen on;
max_connections = 100\t\t\t# (change requires restart)
shared_buffers = 128MB\t\t\t# min 128kB
";

const STOCK_PG_HBA: &str = "\
# TYPE  DATABASE        USER            ADDRESS                 METHOD
local   all             postgres                                peer
local   all             all                                     peer
host    all             all             127.0.0.1/32            scram-sha-256
";

#[derive(Debug, Default)]
struct HostState {
    packages: BTreeSet<String>,
    clusters: BTreeSet<(String, String)>,
    active: BTreeSet<String>,
    enabled: BTreeSet<String>,
    databases: BTreeSet<String>,
    ufw_rules: BTreeSet<String>,
    ufw_active: bool,
    /// Successful readiness probes needed before `SELECT 1` answers
    warmup: u32,
    never_ready: bool,
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    links: BTreeMap<PathBuf, PathBuf>,
    calls: Vec<CommandSpec>,
    restarts: BTreeMap<String, u32>,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    state: Mutex<HostState>,
}

impl FakeHost {
    /// Fresh cloud image: nothing installed
    pub fn fresh() -> Self {
        Self::default()
    }

    /// The database takes `probes` failed `SELECT 1` probes to come up
    pub fn with_slow_database(self, probes: u32) -> Self {
        self.state.lock().unwrap().warmup = probes;
        self
    }

    /// The database service never reports active
    pub fn with_dead_database(self) -> Self {
        self.state.lock().unwrap().never_ready = true;
        self
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.state.lock().unwrap().files.get(Path::new(path)).cloned()
    }

    pub fn put_file(&self, path: &str, content: &str) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(PathBuf::from(path), content.to_string());
    }

    pub fn link(&self, path: &str) -> Option<PathBuf> {
        self.state.lock().unwrap().links.get(Path::new(path)).cloned()
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.state.lock().unwrap().dirs.contains(Path::new(path))
    }

    pub fn has_database(&self, name: &str) -> bool {
        self.state.lock().unwrap().databases.contains(name)
    }

    pub fn is_active(&self, service: &str) -> bool {
        self.state.lock().unwrap().active.contains(service)
    }

    pub fn ufw_rules(&self) -> Vec<String> {
        self.state.lock().unwrap().ufw_rules.iter().cloned().collect()
    }

    pub fn restarts(&self, service: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .restarts
            .get(service)
            .copied()
            .unwrap_or(0)
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Every non-read-only command, rendered
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|c| !c.is_read_only())
            .map(ToString::to_string)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

fn ok(stdout: &str) -> CommandOutput {
    CommandOutput::success(stdout)
}

fn status(code: i32, stdout: &str) -> CommandOutput {
    CommandOutput {
        status: Some(code),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

impl HostState {
    fn install(&mut self, package: &str) {
        self.packages.insert(package.to_string());
        match package {
            "nginx" => {
                self.active.insert("nginx".to_string());
                self.files.insert(
                    PathBuf::from("/etc/nginx/sites-available/default"),
                    "server { listen 80 default_server; }\n".to_string(),
                );
                self.links.insert(
                    PathBuf::from(DEFAULT_SITE_LINK),
                    PathBuf::from("/etc/nginx/sites-available/default"),
                );
            }
            _ => {}
        }
    }

    fn psql(&mut self, args: &[&str]) -> CommandOutput {
        if !self.packages.contains("postgresql") {
            return CommandOutput::failure(127, "psql: command not found");
        }
        match args {
            ["--version"] => ok("psql (PostgreSQL) 14.11 (Ubuntu 14.11-0ubuntu0.22.04.1)\n"),
            ["-tAc", "SELECT 1"] => {
                if !self.active.contains("postgresql") {
                    return CommandOutput::failure(2, "psql: error: connection refused");
                }
                if self.warmup > 0 {
                    self.warmup -= 1;
                    return CommandOutput::failure(2, "psql: error: the database system is starting up");
                }
                ok("1\n")
            }
            [.., sql] if sql.contains("FROM pg_database") => {
                let name = sql.rsplit('\'').nth(1).unwrap_or_default();
                if self.databases.contains(name) {
                    ok("1\n")
                } else {
                    ok("")
                }
            }
            _ => ok(""),
        }
    }

    fn systemctl(&mut self, args: &[&str]) -> CommandOutput {
        match args {
            ["is-active", "--quiet", svc] => {
                if self.is_up(svc) {
                    ok("")
                } else {
                    status(3, "")
                }
            }
            ["is-active", svc] => {
                if self.is_up(svc) {
                    ok("active\n")
                } else {
                    status(3, "inactive\n")
                }
            }
            ["enable", svc] => {
                self.enabled.insert(svc.to_string());
                ok("")
            }
            ["start", svc] => {
                self.active.insert(svc.to_string());
                ok("")
            }
            ["restart", svc] => {
                *self.restarts.entry(svc.to_string()).or_default() += 1;
                self.active.insert(svc.to_string());
                ok("")
            }
            ["reload", svc] if self.active.contains(*svc) => ok(""),
            ["reload", svc] => CommandOutput::failure(1, format!("{svc}.service is not active")),
            ["daemon-reload"] => ok(""),
            _ => CommandOutput::failure(1, "Unknown command verb"),
        }
    }

    fn is_up(&self, svc: &str) -> bool {
        !(svc == "postgresql" && self.never_ready) && self.active.contains(svc)
    }

    fn ufw(&mut self, args: &[&str]) -> CommandOutput {
        match args {
            ["status"] if self.ufw_active => ok("Status: active\n"),
            ["status"] => ok("Status: inactive\n"),
            ["allow", rule] => {
                if self.ufw_rules.insert(rule.to_string()) {
                    ok("Rule added\nRule added (v6)\n")
                } else {
                    ok("Skipping adding existing rule\nSkipping adding existing rule (v6)\n")
                }
            }
            ["--force", "enable"] => {
                self.ufw_active = true;
                ok("Firewall is active and enabled on system startup\n")
            }
            _ => CommandOutput::failure(1, "ERROR: Invalid syntax"),
        }
    }

    fn answer(&mut self, argv: &[&str]) -> CommandOutput {
        match argv {
            ["dpkg-query", "-W", _, pkg] => {
                if self.packages.contains(*pkg) {
                    ok("install ok installed")
                } else {
                    CommandOutput::failure(1, format!("dpkg-query: no packages found matching {pkg}"))
                }
            }
            ["apt-get", "update"] => ok(""),
            ["apt-get", "install", rest @ ..] => {
                for pkg in rest.iter().filter(|a| !a.starts_with('-')) {
                    self.install(pkg);
                }
                ok("")
            }
            ["pg_lsclusters", "--no-header"] => {
                let listing: String = self
                    .clusters
                    .iter()
                    .map(|(v, c)| {
                        format!(
                            "{v}  {c}    5432 online postgres /var/lib/postgresql/{v}/{c} /var/log/postgresql/postgresql-{v}-{c}.log\n"
                        )
                    })
                    .collect();
                ok(&listing)
            }
            ["pg_createcluster", version, cluster, "--start"] => {
                self.clusters.insert((version.to_string(), cluster.to_string()));
                self.active.insert("postgresql".to_string());
                let dir = PathBuf::from(format!("/etc/postgresql/{version}/{cluster}"));
                self.files
                    .insert(dir.join("postgresql.conf"), STOCK_PG_CONF.to_string());
                self.files
                    .insert(dir.join("pg_hba.conf"), STOCK_PG_HBA.to_string());
                ok("")
            }
            ["psql", rest @ ..] => self.psql(rest),
            ["createdb", name] => {
                self.databases.insert(name.to_string());
                ok("")
            }
            ["systemctl", rest @ ..] => self.systemctl(rest),
            ["nginx", "-t"] => CommandOutput {
                status: Some(0),
                stdout: String::new(),
                stderr: "nginx: configuration file /etc/nginx/nginx.conf test is successful\n"
                    .to_string(),
            },
            ["nginx", "-v"] if self.packages.contains("nginx") => CommandOutput {
                status: Some(0),
                stdout: String::new(),
                stderr: "nginx version: nginx/1.18.0 (Ubuntu)\n".to_string(),
            },
            ["python3", "--version"] => ok("Python 3.10.12\n"),
            ["python3", "-m", "venv", path] => {
                let venv = PathBuf::from(path);
                for dir in venv.join("bin").ancestors() {
                    self.dirs.insert(dir.to_path_buf());
                }
                ok("")
            }
            ["chown", ..] | ["chmod", ..] => ok(""),
            ["ufw", rest @ ..] => self.ufw(rest),
            [program, ..] => CommandOutput::failure(127, format!("{program}: command not found")),
            [] => CommandOutput::failure(127, ""),
        }
    }
}

impl CommandRunner for FakeHost {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(spec.clone());
        let argv = spec.argv();
        Ok(state.answer(&argv))
    }
}

impl FileSystem for FakeHost {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(parent) = path.parent() {
            for dir in parent.ancestors() {
                state.dirs.insert(dir.to_path_buf());
            }
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path) || state.links.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.files.remove(path).is_some() || state.links.remove(path).is_some() {
            Ok(())
        } else {
            Err(FsError::NotFound(path.to_path_buf()))
        }
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        for dir in path.ancestors() {
            state.dirs.insert(dir.to_path_buf());
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        let content = self.read(from)?;
        self.write(to, &content)
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        if self.exists(link) {
            return Err(FsError::Other(format!("{} already exists", link.display())));
        }
        self.state
            .lock()
            .unwrap()
            .links
            .insert(link.to_path_buf(), target.to_path_buf());
        Ok(())
    }
}
