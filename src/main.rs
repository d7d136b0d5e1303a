use clap::Parser;
use std::collections::HashMap;
use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;

use vfs_shell::{Shell, ShellOptions};

#[derive(Parser)]
#[command(name = "vfs-shell")]
#[command(about = "A shell emulator over an in-memory virtual filesystem")]
#[command(version)]
struct Cli {
    /// Path to the VFS descriptor: an XML file, or a directory to import
    #[arg(long = "vfs")]
    vfs: Option<PathBuf>,

    /// Startup script to execute
    #[arg(long = "script")]
    script: Option<PathBuf>,

    /// Execute a single command line
    #[arg(short = 'c')]
    command: Option<String>,

    /// Working directory within the VFS
    #[arg(long = "cwd")]
    cwd: Option<String>,

    /// Output results as JSON (stdout, stderr, exitCode)
    #[arg(long = "json")]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Identity comes from the process environment when available
    let mut env = HashMap::new();
    if let Ok(user) = std::env::var("USER") {
        env.insert("USER".to_string(), user);
    }
    if let Ok(host) = std::env::var("HOSTNAME") {
        env.insert("HOSTNAME".to_string(), host);
    }

    let mut shell = Shell::new(ShellOptions {
        vfs: cli.vfs,
        cwd: cli.cwd,
        env: Some(env),
        ..Default::default()
    })
    .await;

    let result = if let Some(line) = cli.command {
        shell.exec_line(&line).await
    } else if let Some(ref file) = cli.script {
        match std::fs::read_to_string(file) {
            Ok(text) => shell.run_script(&text).await,
            Err(e) => {
                eprintln!("vfs-shell: cannot read script file {}: {}", file.display(), e);
                std::process::exit(1);
            }
        }
    } else if std::io::stdin().is_terminal() {
        let code = repl(&mut shell).await;
        std::process::exit(code);
    } else {
        // Non-terminal stdin is treated as a script
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).unwrap_or_default();
        shell.run_script(&buf).await
    };

    if cli.json {
        match serde_json::to_string(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("vfs-shell: cannot encode result: {}", e),
        }
    } else {
        if !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            eprint!("{}", result.stderr);
        }
    }

    std::process::exit(result.exit_code);
}

/// Interactive loop; returns the session's exit status.
async fn repl(shell: &mut Shell) -> i32 {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("{}", shell.prompt());
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return shell.last_exit(), // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("vfs-shell: {}", e);
                return 1;
            }
        }

        let result = shell.exec_line(line.trim_end_matches(['\n', '\r'])).await;
        if !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            eprint!("{}", result.stderr);
        }
        if let Some(code) = shell.exit_requested() {
            return code;
        }
    }
}
