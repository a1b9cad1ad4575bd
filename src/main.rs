//! Line-oriented REPL entry point for `postbox` (spec §6 CLI surface).
//!
//! Commands: `LSM`, `MBOX <n>`, `LSE`, `READ <n>`, `COMPOSE`, `DELETE <n>`,
//! `#` (comment), `EXIT`. Unknown inputs, and any core error, print
//! `Unknown command` (spec §7: the REPL renders every propagated error this
//! way; the core itself never prints).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;

use postbox::config::{self, Config};
use postbox::model::address::Address;
use postbox::model::message::Message;
use postbox::model::mua::Mua;
use postbox::util::addr;

#[derive(Parser)]
#[command(name = "postbox", version, about = "A directory-backed mail user agent")]
struct Cli {
    /// Base directory holding one sub-directory per mailbox.
    #[arg(value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Address used as the `From` header when composing.
    #[arg(long, default_value = "me@localhost")]
    from: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config();
    init_tracing(cli.verbose, &cfg);

    let base_dir = cli
        .base_dir
        .or_else(|| cfg.base_dir.clone())
        .ok_or_else(|| anyhow::anyhow!("no base directory given and none configured"))?;

    let mut mua = Mua::open(base_dir.to_string_lossy().into_owned())?;
    let sender = parse_sender(&cli.from)?;

    run_repl(&mut mua, &sender, &cfg)
}

fn init_tracing(verbose: u8, cfg: &Config) {
    let level = match verbose {
        0 => cfg.log_level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = tracing_subscriber::EnvFilter::try_new(&level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let log_path = config::log_file_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match std::fs::OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            // The REPL runs for the whole process lifetime, so leaking the
            // guard (rather than threading it through `main`) is fine.
            Box::leak(Box::new(guard));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

fn parse_sender(raw: &str) -> anyhow::Result<Address> {
    let tuple = addr::decode(raw)
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("invalid --from address '{raw}'"))?;
    Ok(Address::from_tuple(raw, tuple)?)
}

fn run_repl(mua: &mut Mua, sender: &Address, cfg: &Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    print!("{}", mua.prompt());
    io::stdout().flush().ok();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            print!("{}", mua.prompt());
            io::stdout().flush().ok();
            continue;
        }

        if !dispatch(mua, sender, cfg, trimmed) {
            break;
        }

        print!("{}", mua.prompt());
        io::stdout().flush().ok();
    }
    Ok(())
}

/// Dispatch one command line. Returns `false` on `EXIT`, `true` otherwise.
fn dispatch(mua: &mut Mua, sender: &Address, cfg: &Config, line: &str) -> bool {
    let mut tokens = line.splitn(2, ' ');
    let command = tokens.next().unwrap_or("").to_uppercase();
    let argument = tokens.next().unwrap_or("").trim();

    let result = match command.as_str() {
        "LSM" => list_mailboxes(mua),
        "MBOX" => select_mailbox(mua, argument),
        "LSE" => list_entries(mua),
        "READ" => read_message(mua, argument, cfg),
        "COMPOSE" => compose_message(mua, sender),
        "DELETE" => delete_message(mua, argument),
        "EXIT" => return false,
        _ => {
            println!("Unknown command");
            return true;
        }
    };

    if result.is_err() {
        println!("Unknown command");
    }
    true
}

fn list_mailboxes(mua: &Mua) -> anyhow::Result<()> {
    for (i, mailbox) in mua.mailboxes().iter().enumerate() {
        println!("{}. {} ({} messages)", i + 1, display_name(mailbox.name()), mailbox.count());
    }
    Ok(())
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

fn select_mailbox(mua: &mut Mua, argument: &str) -> anyhow::Result<()> {
    let index: i64 = argument.parse()?;
    mua.select(index)?;
    Ok(())
}

fn list_entries(mua: &Mua) -> anyhow::Result<()> {
    let mailbox = mua.current()?;
    for (i, message) in mailbox.messages().iter().enumerate() {
        println!(
            "{}. {} — {} ({})",
            i + 1,
            message.subject().unwrap_or(""),
            message.sender().map(|a| a.to_canonical()).unwrap_or_default(),
            message
                .date()
                .map(|d| d.to_rfc2822())
                .unwrap_or_default(),
        );
    }
    Ok(())
}

fn read_message(mua: &Mua, argument: &str, cfg: &Config) -> anyhow::Result<()> {
    let index: i64 = argument.parse()?;
    let message = mua.read_message(index)?;
    println!("From: {}", message.sender()?.to_canonical());
    let recipients: Vec<_> = message
        .recipients()?
        .iter()
        .map(Address::to_canonical)
        .collect();
    println!("To: {}", recipients.join(", "));
    println!("Subject: {}", message.subject()?);
    println!(
        "Date: {}",
        message.date()?.format(cfg.date_display_format.as_str())
    );
    for part in message.parts() {
        println!("---");
        println!("{}", part.body());
    }
    Ok(())
}

fn compose_message(mua: &mut Mua, sender: &Address) -> anyhow::Result<()> {
    let to = prompt_line("To: ")?;
    let recipients: Vec<Address> = addr::decode(&to)
        .into_iter()
        .map(|t| Address::from_tuple(&to, t))
        .collect::<Result<_, _>>()?;
    let subject = prompt_line("Subject: ")?;
    let body = prompt_body()?;
    let date = Local::now().fixed_offset();

    let message = Message::singlepart(sender.clone(), recipients, subject, date, body, false)?;
    mua.save_message(message)?;
    Ok(())
}

fn delete_message(mua: &mut Mua, argument: &str) -> anyhow::Result<()> {
    let index: i64 = argument.parse()?;
    mua.delete_message(index)?;
    Ok(())
}

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read body lines until a single blank line is entered.
fn prompt_body() -> io::Result<String> {
    println!("Body (end with a blank line):");
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        if n == 0 || line.trim().is_empty() {
            break;
        }
        lines.push(line.trim_end_matches('\n').to_string());
    }
    Ok(lines.join("\n"))
}
