//! bookshelf CLI
//!
//! Command-line interface for a bookshelf store file.

use std::process;

use bookshelf::{Book, Config, IdRadix, KeyScheme, NewBook, Shelf, Store};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// bookshelf CLI
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Book records on an embedded key-value store")]
#[command(version)]
struct Args {
    /// Store file
    #[arg(short, long, default_value = "books.db")]
    db: String,

    /// Namespace to read and write
    #[arg(short, long, default_value = "books")]
    namespace: String,

    /// How long to wait for the store lock (milliseconds)
    #[arg(long, default_value = "10000")]
    lock_timeout_ms: u64,

    /// Key layout: decimal, padded or big-endian
    #[arg(long, default_value_t = KeyScheme::Decimal)]
    key_scheme: KeyScheme,

    /// Base for reading the last id back from decimal keys: hex or decimal
    #[arg(long, default_value_t = IdRadix::Hexadecimal)]
    id_radix: IdRadix,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add two sample books and print the namespace
    Demo,

    /// Add a book
    Add {
        /// Book title
        title: String,

        /// Book author
        author: String,
    },

    /// Print every book
    List,

    /// Print the book with an exact id
    Get {
        /// The id to get
        id: u64,
    },

    /// Print the first book at or after an id
    Seek {
        /// The id to seek to
        id: u64,
    },

    /// Print the namespaces in the store
    Namespaces,

    /// Print the last id in use
    LastId,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bookshelf=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .db_path(&args.db)
        .namespace(&args.namespace)
        .lock_timeout_ms(args.lock_timeout_ms)
        .key_scheme(args.key_scheme)
        .id_radix(args.id_radix)
        .build();

    // Open store; failing to open is fatal
    let store = match Store::open(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&store, &config, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(store: &Store, config: &Config, command: Commands) -> bookshelf::Result<()> {
    let shelf = Shelf::new(store, config);

    match command {
        Commands::Demo => {
            println!("{:?}", store.list_namespaces()?);

            shelf.add(vec![
                NewBook::new("My First Book", "Human"),
                NewBook::new("My Second Book", "Animal"),
            ])?;

            print_books(&shelf.books()?);
        }
        Commands::Add { title, author } => {
            for book in shelf.add(vec![NewBook::new(title, author)])? {
                println!("{}", book);
            }
        }
        Commands::List => print_books(&shelf.books()?),
        Commands::Get { id } => match shelf.get(id)? {
            Some(book) => println!("{}", book),
            None => println!("(not found)"),
        },
        Commands::Seek { id } => match shelf.seek(id)? {
            Some(book) => println!("{}", book),
            None => println!("(not found)"),
        },
        Commands::Namespaces => {
            for name in store.list_namespaces()? {
                println!("{}", name);
            }
        }
        Commands::LastId => println!("{}", shelf.last_id()?),
    }

    Ok(())
}

fn print_books(books: &[Book]) {
    for book in books {
        println!("{}", book);
    }
}
