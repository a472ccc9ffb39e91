use clap::{Parser, Subcommand};
use log::debug;

use cook_today::client::{
    MemoryNavigator, RecipeApi, RecipeClient, RecipeRequest, View, ViewListener,
};
use cook_today::{serve, ServerConfig};

#[derive(Parser)]
#[command(name = "cook-today", version, about = "Find something to cook today")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Ask a running server for a random recipe
    Random {
        /// Base URL of the server
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
    /// Ask a running server for the best match of a search term
    Search {
        /// Name or ingredient to search for
        term: String,
        /// Base URL of the server
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
}

struct LogViews;

impl ViewListener for LogViews {
    fn view_changed(&self, from: View, to: View) {
        debug!("View changed from {:?} to {:?}", from, to);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (server, request) = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = ServerConfig::load()?;
            serve(config).await?;
            return Ok(());
        }
        Command::Random { server } => (server, RecipeRequest::Random),
        Command::Search { term, server } => (server, RecipeRequest::Search(term)),
    };

    let api = RecipeApi::new(server);
    let mut client = RecipeClient::new(MemoryNavigator::default());
    client.subscribe(Box::new(LogViews));
    client.start();

    if !client.choose(&api, request).await {
        return Err("Search term must not be empty".into());
    }

    print!("{}", client.screen());
    if client.state().error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
