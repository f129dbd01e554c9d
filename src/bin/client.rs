use std::path::PathBuf;

use blogsmith::{
    client::{
        pages::{render_blog_list, Dashboard, LoginPage, Outcome, RegisterPage, SingleBlogView, Tab},
        BlogApi, ClientStore, HttpApi, ImageFile, LocalStorage, Notifier, ToastKind,
        DEFAULT_API_URL,
    },
    telemetry,
};
use clap::{Parser, Subcommand};
use tracing::debug;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "blogsmith-client", about = "Terminal client for the blogsmith API")]
struct Cli {
    /// Base URL of the backend
    #[arg(long, env = "BLOGSMITH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File holding the signed-in user and token
    #[arg(long, env = "BLOGSMITH_SESSION", default_value = ".blogsmith/session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List every blog
    List,
    /// Show one blog
    Show { id: Uuid },
    /// Publish a blog with a cover image
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image: PathBuf,
    },
    /// List blogs with the signed-in token
    Dashboard,
    /// Delete a blog by id
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("blogsmith=warn");

    let cli = Cli::parse();
    let api = HttpApi::new(cli.api_url);
    let storage = LocalStorage::open(&cli.session)?;
    let mut notifier = Notifier::default();

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let mut page = RegisterPage::new();
            page.set_field("name", &name);
            page.set_field("email", &email);
            page.set_field("password", &password);
            let outcome = page.submit(&api, &mut notifier).await;
            report_outcome(&outcome);
        }
        Command::Login { email, password } => {
            let mut store = ClientStore::restore(api.base_url(), storage);
            let mut page = LoginPage::new();
            page.set_field("email", &email);
            page.set_field("password", &password);
            let outcome = page.submit(&api, &mut store, &mut notifier).await;
            report_outcome(&outcome);
        }
        Command::Logout => {
            let mut store = ClientStore::restore(api.base_url(), storage);
            store.logout_user()?;
            notifier.success("Logged out");
        }
        Command::Whoami => {
            let store = ClientStore::restore(api.base_url(), storage);
            match store.user() {
                Some(user) => println!("{} <{}> {}", user.name, user.email, user.id),
                None => println!("not logged in"),
            }
        }
        Command::List => {
            let store = ClientStore::init(&api, storage).await;
            print!("{}", render_blog_list(&store));
        }
        Command::Show { id } => {
            let store = ClientStore::init(&api, storage).await;
            let view = SingleBlogView::find(&store, id);
            if view == SingleBlogView::Loading {
                notifier.error("Blog not found");
            } else {
                print!("{}", view.render(&store));
            }
        }
        Command::Post {
            title,
            category,
            description,
            image,
        } => {
            let store = ClientStore::restore(api.base_url(), storage);
            let mut dash = Dashboard::new();
            dash.tab = Tab::Post;
            dash.set_field("title", &title);
            dash.set_field("category", &category);
            dash.set_field("description", &description);
            dash.set_image(ImageFile::from_path(&image)?);
            dash.submit_post(&api, &store, &mut notifier).await;
        }
        Command::Dashboard => {
            let store = ClientStore::restore(api.base_url(), storage);
            let mut dash = Dashboard::new();
            dash.fetch_blogs(&api, &store, &mut notifier).await;
            print!("{}", dash.render(&store));
        }
        Command::Delete { id } => {
            let store = ClientStore::restore(api.base_url(), storage);
            let mut dash = Dashboard::new();
            dash.remove_blog(&api, &store, &mut notifier, id).await;
        }
    }

    let mut failed = false;
    for toast in notifier.drain() {
        failed |= toast.kind == ToastKind::Error;
        eprintln!("{toast}");
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn report_outcome(outcome: &Outcome) {
    if let Outcome::Navigate(to) = outcome {
        debug!(to, "navigate");
    }
}
