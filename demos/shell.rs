//! Example: interactive terminal front end
//!
//! Drives a `ClientHandle` from typed commands and redraws the published
//! snapshot after each one. Type `help` for the command list.
//!
//! Usage:
//!   cargo run --example shell -- [--api-base URL] [--proxy PROXY] [--session-file PATH]

mod cli;

use cli::{config_from_parser, init_logging, usage_and_exit, ArgParser};
use ofs_client::{
    ClientError, ClientHandle, Form, ListingView, NoticeLevel, Screen, Snapshot,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

const USAGE: &str = "Usage: cargo run --example shell -- [--api-base URL] [--proxy PROXY] [--session-file PATH]";

const HELP: &str = "\
  login USER PASS            log in
  signup USER PASS CONFIRM   create an account
  toggle                     switch between login and signup
  logout                     log out
  ls                         reload the current directory
  cd PATH | cd ..            change directory
  open NAME                  enter a folder or preview a file
  find [TEXT]                filter the listing by name
  touch NAME [TEXT...]       create a file
  mkdir NAME                 create a folder
  edit                       edit the previewed file
  save TEXT...               save the edit
  rm                         delete the previewed file
  close                      close preview or form
  quit                       exit";

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let mut parser = ArgParser::new(USAGE);
    let config = config_from_parser(&mut parser);
    if !parser.remaining().is_empty() {
        usage_and_exit(USAGE);
    }

    let handle = ClientHandle::connect(&config).await?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    render(&handle.snapshot());

    loop {
        let Some(line) = prompt(&mut input, &handle.snapshot()).await? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = words.split_first() else {
            continue;
        };

        let res = match (cmd, args) {
            ("quit" | "exit", _) => break,
            ("help", _) => {
                println!("{HELP}");
                continue;
            }
            ("login", [user, pass]) => handle.login(user, pass).await,
            ("signup", [user, pass, confirm]) => handle.signup(user, pass, confirm).await,
            ("toggle", []) => handle.toggle_signup().await,
            ("logout", []) => handle.logout().await,
            ("ls", []) => handle.refresh().await.map(|_| ()),
            ("cd", [".."]) => handle.navigate_up().await.map(|_| ()),
            ("cd", [path]) => {
                let target = resolve(&handle.snapshot().path, path);
                handle.navigate_to(&target).await.map(|_| ())
            }
            ("open", [name]) => match find_entry(&handle.snapshot(), name) {
                Some(entry) => handle.open(&entry).await,
                None => {
                    println!("no entry named {name}");
                    continue;
                }
            },
            ("find", query) => handle.set_filter(&query.join(" ")).await,
            ("touch", [name, text @ ..]) => {
                handle.create_file(name, &text.join(" ")).await.map(|_| ())
            }
            ("mkdir", [name]) => handle.create_directory(name).await.map(|_| ()),
            ("edit", []) => handle.begin_edit().await,
            ("save", text) => handle.save_edited_file(&text.join(" ")).await,
            ("rm", []) => {
                let confirmed = confirm(&mut input, "Delete this file? [y/N] ").await?;
                handle.delete_current_file(confirmed).await
            }
            ("close", []) => match handle.snapshot().form {
                Some(_) => handle.cancel_form().await,
                None => handle.close_preview().await,
            },
            _ => {
                println!("unknown command, try `help`");
                continue;
            }
        };

        match res {
            Ok(()) | Err(ClientError::ConfirmationRequired) => {}
            // Already shown as a notice.
            Err(e) => tracing::debug!("command failed: {}", e),
        }
        render(&handle.snapshot());
        handle.clear_notice().await?;
    }

    handle.shutdown().await?;
    Ok(())
}

async fn prompt(input: &mut Input, snap: &Snapshot) -> std::io::Result<Option<String>> {
    let label = match (&snap.screen, &snap.username) {
        (Screen::Dashboard, Some(user)) => format!("{}:{}> ", user, snap.path),
        (Screen::Signup, _) => "signup> ".to_string(),
        _ => "login> ".to_string(),
    };
    let mut out = tokio::io::stdout();
    out.write_all(label.as_bytes()).await?;
    out.flush().await?;
    input.next_line().await
}

async fn confirm(input: &mut Input, question: &str) -> std::io::Result<bool> {
    let mut out = tokio::io::stdout();
    out.write_all(question.as_bytes()).await?;
    out.flush().await?;
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn resolve(current: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        ofs_client::RemotePath::new(current).child(path)
    }
}

fn find_entry(snap: &Snapshot, name: &str) -> Option<ofs_client::FileEntry> {
    snap.entries.iter().find(|e| e.name == name).cloned()
}

fn render(snap: &Snapshot) {
    println!();
    if let Some(notice) = &snap.notice {
        let mark = match notice.level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
            NoticeLevel::Info => "ℹ",
        };
        println!("{} {}", mark, notice.text);
    }

    match snap.screen {
        Screen::Login => println!("[login] type `login USER PASS`, or `toggle` to sign up"),
        Screen::Signup => println!("[signup] type `signup USER PASS CONFIRM`, or `toggle` to log in"),
        Screen::Dashboard => render_dashboard(snap),
    }
}

fn render_dashboard(snap: &Snapshot) {
    let trail: Vec<String> = snap
        .breadcrumbs
        .iter()
        .map(|c| if c.active { format!("[{}]", c.label) } else { c.label.clone() })
        .collect();
    println!("{}", trail.join(" / "));
    if !snap.query.is_empty() {
        println!("filter: {:?}", snap.query);
    }

    match &snap.listing {
        ListingView::NotLoaded | ListingView::Loading => println!("  loading..."),
        ListingView::Empty => println!("  No files in this directory"),
        ListingView::SessionExpired => println!("  session expired"),
        ListingView::LoadFailed { message, stale } => {
            println!("  {}", message);
            if *stale {
                println!("  (showing previous listing)");
            }
        }
        ListingView::Loaded { .. } => {}
    }
    for entry in &snap.entries {
        let icon = if entry.is_directory() { "📁" } else { "📄" };
        println!(
            "  {} {:<40} {:>10}",
            icon,
            entry.name,
            entry.display_size().unwrap_or_default()
        );
    }
    println!("  {} file(s)", snap.file_count);

    if let Some(preview) = &snap.preview {
        println!("\n--- {} ({}) ---\n{}\n---", preview.path, preview.size, preview.text);
    }
    match &snap.form {
        Some(Form::CreateFile) => println!("(creating a file)"),
        Some(Form::CreateDirectory) => println!("(creating a folder)"),
        Some(Form::EditFile { draft }) => println!("editing, current text:\n{}", draft),
        None => {}
    }
}
