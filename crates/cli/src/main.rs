use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use time::{macros::format_description, Date};

use bookshelf_app::{
    client::{
        views::{render_detail, render_list, EntityView},
        EntityStore, RouterTransport,
    },
    modules::authors::models::AuthorRef,
    App, Author, Book,
};
use bookshelf_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Author and book catalogue")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Manage authors
    Authors {
        #[command(subcommand)]
        action: AuthorAction,
    },
    /// Manage books
    Books {
        #[command(subcommand)]
        action: BookAction,
    },
}

#[derive(Debug, Subcommand)]
enum AuthorAction {
    /// List every author
    List,
    /// Show one author and their books
    Get { id: i64 },
    /// Create an author
    Create {
        #[command(flatten)]
        fields: AuthorFields,
    },
    /// Overwrite the given fields of an existing author
    Update {
        id: i64,
        #[command(flatten)]
        fields: AuthorFields,
    },
    /// Delete an author; their books are kept without an author
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
enum BookAction {
    /// List every book
    List,
    /// Show one book
    Get { id: i64 },
    /// Create a book
    Create {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Overwrite the given fields of an existing book
    Update {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Delete a book
    Delete { id: i64 },
}

/// An entity command with its parsed fields.
enum Operation<F> {
    List,
    Get(i64),
    Create(F),
    Update(i64, F),
    Delete(i64),
}

impl From<AuthorAction> for Operation<AuthorFields> {
    fn from(action: AuthorAction) -> Self {
        match action {
            AuthorAction::List => Operation::List,
            AuthorAction::Get { id } => Operation::Get(id),
            AuthorAction::Create { fields } => Operation::Create(fields),
            AuthorAction::Update { id, fields } => Operation::Update(id, fields),
            AuthorAction::Delete { id } => Operation::Delete(id),
        }
    }
}

impl From<BookAction> for Operation<BookFields> {
    fn from(action: BookAction) -> Self {
        match action {
            BookAction::List => Operation::List,
            BookAction::Get { id } => Operation::Get(id),
            BookAction::Create { fields } => Operation::Create(fields),
            BookAction::Update { id, fields } => Operation::Update(id, fields),
            BookAction::Delete { id } => Operation::Delete(id),
        }
    }
}

#[derive(Debug, Args)]
struct AuthorFields {
    #[arg(long)]
    name: Option<String>,
    /// Birth date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    birth_date: Option<Date>,
}

#[derive(Debug, Args)]
struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Publication date as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    publication_date: Option<Date>,
    #[arg(long)]
    price: Option<Decimal>,
    /// Id of the owning author
    #[arg(long)]
    author_id: Option<i64>,
}

/// Field overlay applied to a fetched or blank entity.
trait Overlay<E> {
    fn apply(self, entity: E) -> E;
}

impl Overlay<Author> for AuthorFields {
    fn apply(self, mut author: Author) -> Author {
        if self.name.is_some() {
            author.name = self.name;
        }
        if self.birth_date.is_some() {
            author.birth_date = self.birth_date;
        }
        author
    }
}

impl Overlay<Book> for BookFields {
    fn apply(self, mut book: Book) -> Book {
        if self.title.is_some() {
            book.title = self.title;
        }
        if self.description.is_some() {
            book.description = self.description;
        }
        if self.publication_date.is_some() {
            book.publication_date = self.publication_date;
        }
        if self.price.is_some() {
            book.price = self.price;
        }
        if let Some(author_id) = self.author_id {
            book.author = Some(AuthorRef {
                id: Some(author_id),
                ..AuthorRef::default()
            });
        }
        book
    }
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;
    tracing::debug!(command = ?cli.command, "running command");

    let app = App::bootstrap(settings).await?;

    let result = match cli.command {
        Command::Serve => return app.serve().await,
        Command::Migrate => {
            println!(
                "migrations up to date ({} modules)",
                app.registry().module_count()
            );
            Ok(())
        }
        Command::Authors { action } => run::<Author, _>(&app, action.into()).await,
        Command::Books { action } => run::<Book, _>(&app, action.into()).await,
    };

    app.shutdown().await?;
    result
}

async fn run<E, F>(app: &App, operation: Operation<F>) -> anyhow::Result<()>
where
    E: EntityView,
    F: Overlay<E>,
{
    let mut store = EntityStore::<E, _>::new(RouterTransport::new(app.router()));

    match operation {
        Operation::List => {
            store.get_entities().await?;
            print!("{}", render_list(store.state()));
        }
        Operation::Get(id) => {
            store.get_entity(id).await?;
            print!("{}", render_detail(store.state()));
        }
        Operation::Create(fields) => {
            store.create_entity(fields.apply(E::default())).await?;
            print!("{}", render_detail(store.state()));
        }
        Operation::Update(id, fields) => {
            let current = store.get_entity(id).await?.clone();
            store.update_entity(fields.apply(current)).await?;
            print!("{}", render_detail(store.state()));
        }
        Operation::Delete(id) => {
            store.delete_entity(id).await?;
        }
    }

    if let Some(alert) = store.last_alert() {
        println!(
            "{} {}",
            alert.key,
            alert.param.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}
