//! # Command Line
//!
//! clap definitions and the dispatcher that maps a parsed subcommand onto
//! [`crate::commands`], then prints the result as text or JSON.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::config::ConsoleStatus;
use crate::commands::order::{Greeting, OrderOptions, WhatsAppLink};
use crate::commands::product::{CategoryChoice, CategoryGroup, HeroCarousel, ProductView};
use crate::commands::review::ReviewEntry;
use crate::commands::settings::ThemeToken;
use crate::commands::{config, dashboard, inquiry, order, product, review, session, settings};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use kala_core::validation::parse_list;
use kala_core::{
    CategoryFilter, DashboardStats, Inquiry, InquiryFilter, InquiryStatus, NewInquiry, NewProduct,
    Product, ProductPatch, SettingsPatch,
};

#[derive(Debug, Parser)]
#[command(name = "kala-console")]
#[command(about = "Drik Kala storefront admin console")]
#[command(version)]
pub struct Cli {
    /// Config file (default: console.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides config and KALA_DB_PATH
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print results (and errors) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and manage the catalog
    #[command(subcommand)]
    Products(ProductsCommand),

    /// List every customer review (admin)
    Reviews,

    /// Contact form and inquiry inbox
    #[command(subcommand)]
    Inquiries(InquiriesCommand),

    /// Website appearance and content settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Log in as admin
    Login { username: String, password: String },

    /// End the admin session
    Logout,

    /// Show login state and database health
    Status,

    /// Build a WhatsApp order link for a product
    Order {
        product_id: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
    },

    /// Build a WhatsApp enquiry link for a product
    Enquire { product_id: String },

    /// Build a WhatsApp link with one of the fixed greetings
    Greeting {
        #[arg(value_enum)]
        kind: GreetingKind,
    },

    /// Admin dashboard summary
    Dashboard,

    /// Show the effective console configuration
    Config,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products, optionally for one category ("All" for everything)
    List {
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
    },

    /// Show one product with its reviews
    Show { id: String },

    /// Featured products
    Featured,

    /// Home page hero carousel
    Hero {
        /// Current slide index
        #[arg(long, default_value_t = 0)]
        slide: usize,
    },

    /// Products grouped by category
    Sections,

    /// Category selector entries with product counts
    Categories,

    /// Products below the low-stock threshold (admin)
    LowStock,

    /// Add a product (admin)
    Add(AddProductArgs),

    /// Update fields of a product from a JSON patch (admin)
    Update {
        id: String,
        /// e.g. '{"price": 3499, "featured": true}'
        #[arg(long)]
        patch: String,
    },

    /// Delete a product and its reviews (admin)
    Remove { id: String },
}

#[derive(Debug, Args)]
pub struct AddProductArgs {
    /// Whole product as JSON instead of the flags below
    #[arg(long, conflicts_with_all = ["name", "price", "category"])]
    pub from_json: Option<String>,

    #[arg(long, required_unless_present = "from_json")]
    pub name: Option<String>,

    /// Price in rupees
    #[arg(long, required_unless_present = "from_json")]
    pub price: Option<i64>,

    #[arg(long, required_unless_present = "from_json")]
    pub category: Option<String>,

    #[arg(long, default_value_t = 0)]
    pub stock: i64,

    /// Comma-separated, e.g. "S, M, L"
    #[arg(long, default_value = "")]
    pub sizes: String,

    /// Comma-separated
    #[arg(long, default_value = "")]
    pub colors: String,

    /// Comma-separated image URLs, cover first
    #[arg(long, default_value = "")]
    pub images: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long)]
    pub featured: bool,
}

impl AddProductArgs {
    fn into_new_product(self) -> ApiResult<NewProduct> {
        if let Some(json) = self.from_json {
            return Ok(serde_json::from_str(&json)?);
        }

        Ok(NewProduct {
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            images: parse_list(&self.images),
            category: self.category.unwrap_or_default(),
            sizes: parse_list(&self.sizes),
            colors: parse_list(&self.colors),
            description: self.description,
            reviews: Vec::new(),
            featured: self.featured,
            stock: self.stock,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum InquiriesCommand {
    /// List inquiries (admin)
    List {
        /// New or Seen
        #[arg(long)]
        status: Option<InquiryStatus>,
        /// Timestamp prefix, e.g. 2024-01-15
        #[arg(long)]
        date: Option<String>,
    },

    /// Submit the contact form
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
    },

    /// Mark an inquiry as seen (admin)
    Seen { id: String },

    /// Delete an inquiry (admin)
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,

    /// Merge a JSON patch into the settings (admin)
    Set {
        /// e.g. '{"accentColor": "#c0a060"}'
        patch: String,
    },

    /// Restore every default (admin)
    Reset,

    /// CSS custom properties for the current theme
    Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GreetingKind {
    Contact,
    Float,
}

impl From<GreetingKind> for Greeting {
    fn from(kind: GreetingKind) -> Self {
        match kind {
            GreetingKind::Contact => Greeting::Contact,
            GreetingKind::Float => Greeting::Float,
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one parsed command against `state` and prints its result.
pub async fn execute(state: &AppState, command: Command, json: bool) -> ApiResult<()> {
    let out = Printer { json };

    match command {
        Command::Products(cmd) => execute_products(state, cmd, out).await,
        Command::Reviews => out.print(&review::list_reviews(state).await?, |v| render_reviews(v)),
        Command::Inquiries(cmd) => execute_inquiries(state, cmd, out).await,
        Command::Settings(cmd) => execute_settings(state, cmd, out).await,
        Command::Login { username, password } => {
            let status = session::login(state, &username, &password).await?;
            out.print(&status, |_| "Logged in".to_string())
        }
        Command::Logout => {
            let status = session::logout(state).await?;
            out.print(&status, |_| "Logged out".to_string())
        }
        Command::Status => out.print(&config::console_status(state).await?, render_status),
        Command::Order {
            product_id,
            color,
            size,
            quantity,
        } => {
            let options = OrderOptions {
                color,
                size,
                quantity,
            };
            out.print(&order::order_link(state, &product_id, options).await?, render_link)
        }
        Command::Enquire { product_id } => {
            out.print(&order::enquiry_link(state, &product_id).await?, render_link)
        }
        Command::Greeting { kind } => {
            out.print(&order::greeting_link(state, kind.into()).await?, render_link)
        }
        Command::Dashboard => out.print(&dashboard::dashboard(state).await?, render_dashboard),
        Command::Config => {
            let config = config::get_config(state);
            let text = config.to_toml()?;
            out.print(&config, |_| text)
        }
    }
}

async fn execute_products(state: &AppState, cmd: ProductsCommand, out: Printer) -> ApiResult<()> {
    match cmd {
        ProductsCommand::List { category } => {
            out.print(&product::list_products(state, &category).await, |v| render_products(v))
        }
        ProductsCommand::Show { id } => {
            out.print(&product::get_product(state, &id).await?, render_product)
        }
        ProductsCommand::Featured => {
            out.print(&product::featured_products(state).await, |v| render_products(v))
        }
        ProductsCommand::Hero { slide } => {
            out.print(&product::hero_carousel(state, slide).await, render_hero)
        }
        ProductsCommand::Sections => {
            out.print(&product::products_by_category(state).await, |v| render_sections(v))
        }
        ProductsCommand::Categories => {
            out.print(&product::category_choices(state).await, |v| render_choices(v))
        }
        ProductsCommand::LowStock => {
            out.print(&product::low_stock_products(state).await?, |v| render_products(v))
        }
        ProductsCommand::Add(args) => {
            let data = args.into_new_product()?;
            out.print(&product::add_product(state, data).await?, render_product)
        }
        ProductsCommand::Update { id, patch } => {
            let patch: ProductPatch = serde_json::from_str(&patch)?;
            out.print(&product::update_product(state, &id, patch).await?, render_product)
        }
        ProductsCommand::Remove { id } => {
            product::remove_product(state, &id).await?;
            out.print(&serde_json::json!({ "removed": id }), |_| format!("Removed product {}", id))
        }
    }
}

async fn execute_inquiries(state: &AppState, cmd: InquiriesCommand, out: Printer) -> ApiResult<()> {
    match cmd {
        InquiriesCommand::List { status, date } => {
            let filter = InquiryFilter {
                status,
                date_prefix: date,
            };
            out.print(&inquiry::list_inquiries(state, &filter).await?, |v| render_inquiries(v))
        }
        InquiriesCommand::Submit {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let data = NewInquiry {
                name,
                email,
                phone,
                subject,
                message,
            };
            let submitted = inquiry::submit_inquiry(state, data).await?;
            out.print(&submitted, |i| format!("Thank you! Inquiry {} received.", i.id))
        }
        InquiriesCommand::Seen { id } => {
            out.print(&inquiry::mark_inquiry_seen(state, &id).await?, render_inquiry)
        }
        InquiriesCommand::Remove { id } => {
            inquiry::remove_inquiry(state, &id).await?;
            out.print(&serde_json::json!({ "removed": id }), |_| format!("Removed inquiry {}", id))
        }
    }
}

async fn execute_settings(state: &AppState, cmd: SettingsCommand, out: Printer) -> ApiResult<()> {
    match cmd {
        SettingsCommand::Show => out.print(&settings::get_settings(state).await, render_pretty),
        SettingsCommand::Set { patch } => {
            let patch: SettingsPatch = serde_json::from_str(&patch)?;
            out.print(&settings::update_settings(state, patch).await?, render_pretty)
        }
        SettingsCommand::Reset => out.print(&settings::reset_settings(state).await?, render_pretty),
        SettingsCommand::Theme => {
            out.print(&settings::theme_tokens(state).await, |v| render_theme(v))
        }
    }
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Printer {
    json: bool,
}

impl Printer {
    fn print<T: Serialize>(self, value: &T, text: impl FnOnce(&T) -> String) -> ApiResult<()> {
        if self.json {
            let rendered = serde_json::to_string_pretty(value)
                .map_err(|e| ApiError::internal(format!("Could not render output: {}", e)))?;
            println!("{}", rendered);
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }
}

fn stars(filled: u8) -> String {
    let filled = usize::from(filled.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn render_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn render_product_row(p: &ProductView) -> String {
    format!(
        "{:<38} {:<30} ₹{:>6}  {} ({:.1})  stock {:>3} [{}]{}",
        p.id,
        p.name,
        p.price,
        stars(p.stars),
        p.average_rating,
        p.stock,
        p.stock_level,
        if p.featured { "  featured" } else { "" }
    )
}

fn render_products(products: &[ProductView]) -> String {
    if products.is_empty() {
        return "No products".to_string();
    }
    products
        .iter()
        .map(render_product_row)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_product(p: &Product) -> String {
    let mut lines = vec![
        format!("{} ({})", p.name, p.id),
        format!("  ₹{}  {}  stock {}", p.price, p.category, p.stock),
        format!("  sizes: {}", p.sizes.join(", ")),
        format!("  colors: {}", p.colors.join(", ")),
    ];
    if !p.description.is_empty() {
        lines.push(format!("  {}", p.description));
    }
    for r in &p.reviews {
        lines.push(format!("  {} {} ({}): {}", stars(r.rating), r.name, r.date, r.comment));
    }
    lines.join("\n")
}

fn render_hero(hero: &HeroCarousel) -> String {
    match hero.slides.get(hero.current) {
        None => "No featured products".to_string(),
        Some(slide) => format!(
            "Slide {}/{}: {} (next {}, previous {}, every {}s)",
            hero.current + 1,
            hero.slides.len(),
            slide.name,
            hero.next + 1,
            hero.previous + 1,
            hero.interval_secs
        ),
    }
}

fn render_sections(groups: &[CategoryGroup]) -> String {
    groups
        .iter()
        .map(|g| format!("{} ({})\n{}", g.category, g.products.len(), render_products(&g.products)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_choices(choices: &[CategoryChoice]) -> String {
    choices
        .iter()
        .map(|c| format!("{:<20} {}", c.label, c.count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_reviews(reviews: &[ReviewEntry]) -> String {
    if reviews.is_empty() {
        return "No reviews yet".to_string();
    }
    reviews
        .iter()
        .map(|e| {
            format!(
                "{} {} ({}) on {}: {}",
                stars(e.review.rating),
                e.review.name,
                e.review.date,
                e.product_name,
                e.review.comment
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_inquiry(i: &Inquiry) -> String {
    let mut header = format!(
        "[{}] {}  {}  {} <{}>",
        i.status,
        i.id,
        i.timestamp_string(),
        i.name,
        i.email
    );
    if let Some(phone) = &i.phone {
        header.push_str(&format!("  {}", phone));
    }
    if let Some(subject) = &i.subject {
        header.push_str(&format!("\n    {}", subject));
    }
    format!("{}\n    {}", header, i.message)
}

fn render_inquiries(inquiries: &[Inquiry]) -> String {
    if inquiries.is_empty() {
        return "No inquiries".to_string();
    }
    inquiries
        .iter()
        .map(render_inquiry)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_theme(tokens: &[ThemeToken]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}: {};", t.name, t.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_link(link: &WhatsAppLink) -> String {
    format!("{}\n\n{}", link.url, link.message)
}

fn render_status(status: &ConsoleStatus) -> String {
    let records = if status.records.is_empty() {
        "none".to_string()
    } else {
        status.records.join(", ")
    };
    format!(
        "Admin:      {}\nDatabase:   {}\nMigrations: {}/{}\nRecords:    {}",
        if status.session.authenticated { "logged in" } else { "not logged in" },
        if status.database_ok { "ok" } else { "unreachable" },
        status.migrations.applied,
        status.migrations.embedded,
        records
    )
}

fn render_dashboard(stats: &DashboardStats) -> String {
    format!(
        "Total products:    {}\nFeatured products: {}\nTotal reviews:     {}\nNew inquiries:     {}",
        stats.total_products, stats.featured_products, stats.total_reviews, stats.new_inquiries
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_category_filter() {
        let cli = Cli::parse_from([
            "kala-console",
            "products",
            "list",
            "--category",
            "Festive Wear",
        ]);
        match cli.command {
            Command::Products(ProductsCommand::List { category }) => {
                assert_eq!(category, CategoryFilter::Category("Festive Wear".to_string()))
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["kala-console", "--json", "products", "list"]);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Products(ProductsCommand::List {
                category: CategoryFilter::All
            })
        ));
    }

    #[test]
    fn test_parse_inquiry_status() {
        let cli = Cli::parse_from(["kala-console", "inquiries", "list", "--status", "seen"]);
        assert!(matches!(
            cli.command,
            Command::Inquiries(InquiriesCommand::List {
                status: Some(InquiryStatus::Seen),
                ..
            })
        ));
        let bad_status = ["kala-console", "inquiries", "list", "--status", "done"];
        assert!(Cli::try_parse_from(bad_status).is_err());
    }

    #[test]
    fn test_add_product_flags() {
        let cli = Cli::parse_from([
            "kala-console",
            "products",
            "add",
            "--name",
            "Linen Co-ord",
            "--price",
            "2499",
            "--category",
            "Co-ord Sets",
            "--sizes",
            "S, M,, L ",
            "--stock",
            "4",
        ]);
        let Command::Products(ProductsCommand::Add(args)) = cli.command else {
            panic!("expected products add");
        };
        let data = args.into_new_product().unwrap();
        assert_eq!(data.sizes, vec!["S", "M", "L"]);
        assert!(data.colors.is_empty());
        assert_eq!(data.stock, 4);

        assert!(Cli::try_parse_from(["kala-console", "products", "add", "--name", "x"]).is_err());
    }

    #[test]
    fn test_parse_product_patch_alongside_json_output() {
        let patch = r#"{"price":1}"#;

        let args = ["kala-console", "products", "update", "3", "--patch", patch];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(!cli.json);
        match cli.command {
            Command::Products(ProductsCommand::Update { id, patch: raw }) => {
                assert_eq!(id, "3");
                let parsed: ProductPatch = serde_json::from_str(&raw).unwrap();
                assert_eq!(parsed.price, Some(1));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from([
            "kala-console",
            "--json",
            "products",
            "update",
            "3",
            "--patch",
            patch,
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Products(ProductsCommand::Update { .. })
        ));

        let args = ["kala-console", "settings", "set", r##"{"accentColor":"#fff"}"##, "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Settings(SettingsCommand::Set { .. })));
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
