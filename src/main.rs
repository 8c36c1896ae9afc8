use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tarot::config::AppConfig;
use tarot::draw::StandardDrawStrategy;
use tarot::recommend::{Recommender, SpreadSuggestion};
use tarot::repository::{CardRepository, JsonCardRepository};
use tarot::service::DrawService;
use tarot::spread::{
    default_catalog, FourCardPattern, Spread, SpreadTemplate, ThreeCardPattern,
};

/// Offline tarot reading CLI: describe your question in free text and get
/// spread recommendations, then draw the cards.
#[derive(Parser)]
#[command(name = "tarot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline tarot readings with spread recommendation", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to an optional tarot.toml config file
    #[arg(long, default_value = "tarot.toml")]
    config: PathBuf,

    /// Path to a custom cards JSON file (defaults to the embedded 78-card deck)
    #[arg(long)]
    cards: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive reading loop (default when no subcommand is given)
    Interactive,

    /// Print spread suggestions for a question
    Recommend {
        /// The question to match against the spread catalog
        question: String,
    },

    /// List all known spreads
    Spreads,

    /// One-shot draw without the interactive loop
    Draw {
        /// Spread number from `tarot spreads` (1-based); plain draw when omitted
        #[arg(long)]
        spread: Option<usize>,
        /// Number of cards for a plain draw
        #[arg(long, default_value = "1")]
        count: usize,
        /// Allow reversed cards
        #[arg(long)]
        reversed: bool,
        /// RNG seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for menus and results
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load(&cli.config)?;
    debug!(?config, "configuration loaded");

    let repository: Box<dyn CardRepository> = match &cli.cards {
        Some(path) => Box::new(JsonCardRepository::from_path(path)),
        None => Box::new(JsonCardRepository::embedded()),
    };

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(&config, repository),
        Commands::Recommend { question } => {
            let recommender = Recommender::new(&default_catalog(), config.recommender);
            print_suggestions(&recommender.recommend(&question));
            Ok(())
        }
        Commands::Spreads => {
            list_spreads();
            Ok(())
        }
        Commands::Draw {
            spread,
            count,
            reversed,
            seed,
        } => run_draw(repository, spread, count, reversed, seed),
    }
}

fn run_interactive(config: &AppConfig, repository: Box<dyn CardRepository>) -> Result<()> {
    let recommender = Recommender::new(&default_catalog(), config.recommender.clone());
    let mut service = DrawService::with_entropy(repository, Box::new(StandardDrawStrategy))?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    println!("欢迎使用塔罗牌抽牌程序");
    println!("当前使用标准78张塔罗牌 & 标准抽牌策略");
    println!();

    loop {
        let question = match prompt_question(&mut input)? {
            Some(question) => question,
            None => break,
        };

        let spread = match choose_spread(&mut input, &recommender, &question)? {
            Some(spread) => spread,
            None => {
                println!("已退出程序，再见");
                break;
            }
        };

        let reversed = ask_reversed(&mut input, config.draw.reversed)?;

        // Every reading starts from a full, freshly shuffled deck
        service.reset_deck()?;
        println!("正在抽牌，请稍候...");
        let result = service.draw_spread(&spread, reversed)?;

        println!("=====================");
        print!("{}", result);
        println!("=====================");
        println!();

        println!("是否继续抽牌? (y/n 默认y): ");
        match read_line(&mut input)? {
            Some(line) if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") => {
                println!("好的，祝你今天愉快");
                break;
            }
            Some(_) => println!(),
            None => break,
        }
    }

    Ok(())
}

/// Read one trimmed line; `None` means end of input
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_question(input: &mut impl BufRead) -> Result<Option<String>> {
    println!("在选择牌阵前，请简要描述你想问的问题（例如「近期工作机会如何？」、「我和TA的关系走向？」）。");
    println!("请输入你的问题，直接回车则使用常规流程：");

    let question = match read_line(input)? {
        Some(question) => question,
        None => {
            println!("未检测到输入，程序结束。");
            return Ok(None);
        }
    };

    if question.is_empty() {
        println!("好的，将按常规流程选择牌阵。");
    } else {
        println!("收到，你的问题是：「{}」。", question);
    }
    println!();
    Ok(Some(question))
}

/// Offer recommendations first, fall back to the manual menu. `None` means
/// the user asked to exit.
fn choose_spread(
    input: &mut impl BufRead,
    recommender: &Recommender,
    question: &str,
) -> Result<Option<Spread>> {
    let suggestions = recommender.recommend(question);
    if let Some(spread) = choose_from_suggestions(input, &suggestions)? {
        return Ok(Some(spread));
    }
    choose_spread_from_menu(input)
}

/// `None` means the user rejected the suggestions and wants the manual menu
fn choose_from_suggestions(
    input: &mut impl BufRead,
    suggestions: &[SpreadSuggestion],
) -> Result<Option<Spread>> {
    println!("根据你的问题，推荐以下牌阵：");
    print_suggestions(suggestions);
    println!(" 0. 都不合适，我想自己选择");
    println!("请输入编号，默认1：");

    let line = match read_line(input)? {
        Some(line) => line,
        None => {
            println!("未检测到输入，默认选择第一个推荐。");
            return Ok(Some(suggestions[0].spread.clone()));
        }
    };

    if line.is_empty() {
        return Ok(Some(suggestions[0].spread.clone()));
    }
    if line == "0" {
        println!("好的，你可以自行选择牌阵。");
        println!();
        return Ok(None);
    }
    if let Ok(index) = line.parse::<usize>() {
        if (1..=suggestions.len()).contains(&index) {
            return Ok(Some(suggestions[index - 1].spread.clone()));
        }
    }
    println!("输入无效，默认使用第一个推荐。");
    Ok(Some(suggestions[0].spread.clone()))
}

fn print_suggestions(suggestions: &[SpreadSuggestion]) {
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            " {}. {} —— {}",
            i + 1,
            suggestion.spread.name(),
            suggestion.reason
        );
    }
}

/// Manual spread menu. `None` means the user asked to exit.
fn choose_spread_from_menu(input: &mut impl BufRead) -> Result<Option<Spread>> {
    loop {
        println!("请选择牌阵类型：");
        println!(" 1. 单张牌：主题指引");
        println!(" 2. 三张牌(选择解读方式)");
        println!(" 3. 四张牌(选择解读方式)");
        println!(" 4. 四张牌：你 / 对方 / 关系走向 / 建议");
        println!(" 0. 退出程序");
        println!();
        println!("请输入选项编号：");

        let choice = match read_line(input)? {
            Some(choice) => choice,
            None => {
                println!("未检测到输入，程序结束。");
                return Ok(None);
            }
        };

        match choice.as_str() {
            "1" => return Ok(Some(Spread::single_card())),
            "2" => match choose_template(input, &ThreeCardPattern::ALL, "三张牌")? {
                Some(spread) => return Ok(Some(spread)),
                None => {
                    println!();
                    continue;
                }
            },
            "3" => match choose_template(input, &FourCardPattern::ALL, "四张牌")? {
                Some(spread) => return Ok(Some(spread)),
                None => {
                    println!();
                    continue;
                }
            },
            "4" => return Ok(Some(Spread::relationship_four_card())),
            "0" => return Ok(None),
            _ => {
                println!("无效选项，请重新输入。");
                println!();
            }
        }
    }
}

/// Pick a reading template from a closed set. `None` means back to the
/// previous menu.
fn choose_template<T: SpreadTemplate>(
    input: &mut impl BufRead,
    templates: &[T],
    card_count_label: &str,
) -> Result<Option<Spread>> {
    println!();
    println!("请选择{}的解读方式：", card_count_label);
    for (i, template) in templates.iter().enumerate() {
        println!(" {}. {}", i + 1, template.display_name());
    }
    println!(" 0. 返回上级菜单");
    println!("请输入编号，默认1：");

    let line = match read_line(input)? {
        Some(line) => line,
        None => {
            println!("检测到输入结束，返回上一级菜单");
            return Ok(None);
        }
    };

    if line == "0" {
        return Ok(None);
    }

    let mut index = 0;
    if !line.is_empty() {
        match line.parse::<usize>() {
            Ok(choice) if (1..=templates.len()).contains(&choice) => index = choice - 1,
            Ok(_) => println!("输入超出范围，默认选择第一个"),
            Err(_) => println!("输入不是数字，默认选择第一个"),
        }
    }

    let template = &templates[index];
    println!(
        "你选择了{}解读方式：{}",
        card_count_label,
        template.display_name()
    );
    Ok(Some(Spread::from_template(card_count_label, template)))
}

fn ask_reversed(input: &mut impl BufRead, default_reversed: bool) -> Result<bool> {
    println!(
        "是否启用逆位? (y/n 默认{}): ",
        if default_reversed { "y" } else { "n" }
    );
    let line = match read_line(input)? {
        Some(line) => line,
        None => {
            println!("未检测到输入，保持默认：不启用逆位。");
            return Ok(false);
        }
    };

    if line.is_empty() {
        return Ok(default_reversed);
    }
    if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") {
        return Ok(false);
    }
    Ok(true)
}

fn list_spreads() {
    for (i, spread) in default_catalog().iter().enumerate() {
        let labels: Vec<&str> = spread.positions().iter().map(|p| p.label()).collect();
        println!(
            " {}. {} ({}张牌：{})",
            i + 1,
            spread.name(),
            spread.card_count(),
            labels.join(" / ")
        );
    }
}

fn run_draw(
    repository: Box<dyn CardRepository>,
    spread_index: Option<usize>,
    count: usize,
    reversed: bool,
    seed: Option<u64>,
) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut service = DrawService::new(repository, Box::new(StandardDrawStrategy), rng)?;

    match spread_index {
        Some(index) => {
            let catalog = default_catalog();
            if index == 0 || index > catalog.len() {
                bail!(
                    "spread number {} is out of range (1-{})",
                    index,
                    catalog.len()
                );
            }
            let result = service.draw_spread(&catalog[index - 1], reversed)?;
            print!("{}", result);
        }
        None => {
            let result = service.draw_cards(count, reversed)?;
            print!("{}", result);
        }
    }
    Ok(())
}
