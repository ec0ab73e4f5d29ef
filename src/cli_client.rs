use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod cli_style;
mod client;
mod forum_store;
mod render;
mod user;

use cli_style::get_styles;
use client::{ApiClient, ClientSession, ProfileStore, Theme, ViewState, DEFAULT_PROFILE_FILE};

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::FileHistory,
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Base URL of the verseboard server.
    #[clap(long, default_value = "http://127.0.0.1:3000")]
    pub server_url: String,

    /// Path to the profile file holding the session and the theme.
    #[clap(long, value_parser = parse_path)]
    pub profile: Option<PathBuf>,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Creates a new account on the server.
    Register { username: String, password: String },

    /// Logs into the server and stores the session in the profile.
    Login { username: String, password: String },

    /// Invalidates the session on the server and clears it from the profile.
    Logout,

    /// Fetches the poem board from the server.
    Refresh,

    /// Filters the board by a case-insensitive substring over titles,
    /// authors and content. Without terms the filter is cleared.
    Search { terms: Vec<String> },

    /// Publishes a new poem. Quote the title if it contains spaces; a
    /// literal "\n" in the content starts a new line.
    Post { title: String, content: Vec<String> },

    /// Comments on the poem with the given display number.
    Comment { number: usize, text: Vec<String> },

    /// Switches the color theme. Without an argument the theme is toggled.
    Theme { theme: Option<Theme> },

    /// Shows the current session.
    Whoami,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

struct ClientContext {
    api: ApiClient,
    profile_store: ProfileStore,
    view: ViewState,
}

impl ClientContext {
    fn refresh(&mut self) -> Result<()> {
        let poems = self.api.list_poems()?;
        self.view.set_poems(poems);
        Ok(())
    }

    fn session(&self) -> Option<&ClientSession> {
        self.profile_store.profile().session.as_ref()
    }

    fn theme(&self) -> Theme {
        self.profile_store.profile().theme
    }
}

fn execute_command(line: String, ctx: &mut ClientContext) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => {
            cli_style::print_command_echo(&line, &cli_style::palette(ctx.theme()));
            match cli.command {
                InnerCommand::Register { username, password } => {
                    if let Err(err) = ctx.api.register(&username, &password) {
                        return CommandExecutionResult::Error(format!("{}", err));
                    }
                    cli_style::print_success("Registration successful! Please log in.");
                }
                InnerCommand::Login { username, password } => {
                    let login = match ctx.api.login(&username, &password) {
                        Ok(x) => x,
                        Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
                    };
                    if let Err(err) = ctx.profile_store.set_session(Some(ClientSession {
                        user_id: login.user_id,
                        username: login.username.clone(),
                        token: login.token,
                    })) {
                        return CommandExecutionResult::Error(format!("{}", err));
                    }
                    match ctx.refresh() {
                        Ok(()) => {
                            cli_style::print_success(&format!("Logged in as {}.", login.username))
                        }
                        Err(err) => cli_style::print_warning(&format!(
                            "Logged in, but fetching the board failed: {}",
                            err
                        )),
                    }
                }
                InnerCommand::Logout => {
                    match ctx.session() {
                        None => {
                            return CommandExecutionResult::Error("Not logged in.".to_string());
                        }
                        Some(session) => {
                            if let Err(err) = ctx.api.logout(&session.token) {
                                cli_style::print_warning(&format!(
                                    "The server refused the logout: {}",
                                    err
                                ));
                            }
                        }
                    }
                    if let Err(err) = ctx.profile_store.set_session(None) {
                        return CommandExecutionResult::Error(format!("{}", err));
                    }
                    cli_style::print_success("Logged out.");
                }
                InnerCommand::Refresh => {
                    if let Err(err) = ctx.refresh() {
                        return CommandExecutionResult::Error(format!("{}", err));
                    }
                }
                InnerCommand::Search { terms } => {
                    ctx.view.set_search(terms.join(" "));
                }
                InnerCommand::Post { title, content } => {
                    let session = match ctx.session() {
                        Some(x) => x.clone(),
                        None => {
                            return CommandExecutionResult::Error(
                                "You must login first.".to_string(),
                            );
                        }
                    };
                    let content = content.join(" ").replace("\\n", "\n");
                    match ctx.api.create_poem(&session.token, &title, &content) {
                        Ok(poem) => {
                            ctx.view.merge_poem(poem);
                            cli_style::print_success("Poem published.");
                        }
                        Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
                    }
                }
                InnerCommand::Comment { number, text } => {
                    let session = match ctx.session() {
                        Some(x) => x.clone(),
                        None => {
                            return CommandExecutionResult::Error(
                                "You must login first.".to_string(),
                            );
                        }
                    };
                    let poem_id = match ctx.view.poem_id_at(number) {
                        Some(x) => x,
                        None => {
                            return CommandExecutionResult::Error(format!(
                                "No poem with number {} on the board.",
                                number
                            ));
                        }
                    };
                    match ctx.api.add_comment(&session.token, &poem_id, &text.join(" ")) {
                        Ok(comment) => {
                            ctx.view.merge_comment(&poem_id, comment);
                            cli_style::print_success("Comment added.");
                        }
                        Err(err) => return CommandExecutionResult::Error(format!("{}", err)),
                    }
                }
                InnerCommand::Theme { theme } => {
                    let new_theme = theme.unwrap_or_else(|| ctx.theme().toggled());
                    if let Err(err) = ctx.profile_store.set_theme(new_theme) {
                        return CommandExecutionResult::Error(format!("{}", err));
                    }
                    cli_style::print_success(&format!("Theme set to {}.", new_theme));
                }
                InnerCommand::Whoami => match ctx.session() {
                    Some(session) => {
                        let palette = cli_style::palette(ctx.theme());
                        cli_style::print_key_value("User", &session.username, &palette);
                        cli_style::print_key_value("User id", &session.user_id, &palette);
                    }
                    None => cli_style::print_warning("Not logged in."),
                },
                InnerCommand::Exit => return CommandExecutionResult::Exit,
            }
        }

        Err(e) => {
            if let Err(_) = e.print() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

fn redraw(ctx: &ClientContext) {
    let profile = ctx.profile_store.profile();
    let palette = cli_style::palette(profile.theme);

    match &profile.session {
        Some(session) => cli_style::print_key_value("Logged in as", &session.username, &palette),
        None => cli_style::print_key_value("Session", "none, login to post and comment", &palette),
    }
    if !ctx.view.search().is_empty() {
        cli_style::print_key_value("Search", &format!("\"{}\"", ctx.view.search()), &palette);
    }
    println!();
    cli_style::print_board(&ctx.view.render(profile.session.is_some()), &palette);
    println!();
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(" ") {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let profile_path = match cli_args.profile {
        Some(path) => path,
        None => PathBuf::from(DEFAULT_PROFILE_FILE),
    };

    let mut ctx = ClientContext {
        api: ApiClient::new(cli_args.server_url.clone()),
        profile_store: ProfileStore::initialize(profile_path),
        view: ViewState::default(),
    };

    let palette = cli_style::palette(ctx.theme());
    cli_style::print_welcome(
        &cli_args.server_url,
        &ctx.profile_store.file_path().display().to_string(),
        &palette,
    );

    if let Err(err) = ctx.refresh() {
        cli_style::print_warning(&format!("Could not fetch the board: {}", err));
    }
    redraw(&ctx);

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;

    let helper = MyHelper::new();
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(&cli_style::get_prompt(&cli_style::palette(ctx.theme())));

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let _ = rl.clear_screen();
                match execute_command(line, &mut ctx) {
                    CommandExecutionResult::Ok => {
                        redraw(&ctx);
                    }
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}
