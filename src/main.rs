use clap::Parser;
use count_vision::{cli, client, config, error, render, session_store};
use cli::{Cli, Commands};
use client::{ApiClient, HttpTransport, ImageFile};
use config::Config;
use count_vision_common::api::{RegisterForm, ITEM_TYPES};
use count_vision_common::{normalize, normalize_all, Notice, Paginator};
use error::{CountVisionError, Result};
use tracing::Level;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let fallback = cli.command.failure_message();
    if let Err(e) = run(cli).await {
        tracing::debug!("{:?}", e);
        render::print_notice(&e.notice(fallback));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let session_path = session_store::session_path()?;
    let mut session = session_store::load(&session_path);
    let bounds = config.sample_bounds();
    let base = config.static_base();

    match cli.command {
        Commands::Register { name, email, password, confirm_password } => {
            let api = ApiClient::new(HttpTransport::new(&config)?);
            let form = RegisterForm {
                name,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            api.register(&form).await?;
            render::print_notice(&Notice::success("Registration successful! Please login."));
        }

        Commands::Login { email, password } => {
            let api = ApiClient::new(HttpTransport::new(&config)?);
            let response = api.login(&mut session, &email, &password).await?;
            let notice = Notice::for_login(&response);
            render::print_notice(&notice);
            if response.user_id.is_none() {
                return Ok(());
            }
            session_store::save(&session_path, &session)?;
            if let Some(name) = session.display_name() {
                println!("  ユーザー: {}", name);
            }
        }

        Commands::Logout => {
            if session_store::clear(&session_path)? {
                render::print_notice(&Notice::success("ログアウトしました"));
            } else {
                render::print_notice(&Notice::info("ログインしていません"));
            }
        }

        Commands::Count { image, item_type } => {
            let api = ApiClient::new(HttpTransport::new(&config)?);
            let image = ImageFile::read(&image).await?;

            println!("📷 {} をアップロード中...", image.file_name);
            let result = api.count(&session, image, &item_type).await?;
            render::print_notice(&Notice::success("Image uploaded successfully!"));
            print!("{}", render::render_card(&normalize(&result, &base), bounds));
        }

        Commands::Batch { images, item_type } => {
            if images.is_empty() {
                return Err(CountVisionError::NoImages);
            }
            let api = ApiClient::new(HttpTransport::new(&config)?);
            let mut files = Vec::with_capacity(images.len());
            for path in &images {
                files.push(ImageFile::read(path).await?);
            }

            println!("📷 {}枚をアップロード中...", files.len());
            let results = normalize_all(&api.batch_count(&session, files, &item_type).await?, &base);
            render::print_notice(&Notice::success(format!("{} images processed", results.len())));

            let mut pager = Paginator::new(results.len());
            for page in 1..=pager.page_count().max(1) {
                pager.go_to(page);
                print!("{}", render::render_page(&results, &pager, bounds));
            }
        }

        Commands::History { page, all, json } => {
            let api = ApiClient::new(HttpTransport::new(&config)?);
            let results = normalize_all(&api.previous_results(&session).await?, &base);

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }

            let mut pager = Paginator::new(results.len());
            if all {
                for p in 1..=pager.page_count().max(1) {
                    pager.go_to(p);
                    print!("{}", render::render_page(&results, &pager, bounds));
                }
            } else {
                pager.go_to(page);
                print!("{}", render::render_page(&results, &pager, bounds));
            }
        }

        Commands::Correct { result_id, count } => {
            let api = ApiClient::new(HttpTransport::new(&config)?);
            let request = api.correct(Some(&result_id), &count).await?;
            render::print_notice(&Notice::success("Correction saved"));
            println!("  {} → User Correction: {}", request.result_id, request.correct_count);
        }

        Commands::ItemTypes => {
            for item in ITEM_TYPES {
                println!("{}", item);
            }
        }

        Commands::Config { set_api_url, set_static_url, show } => {
            let changed = set_api_url.is_some() || set_static_url.is_some();
            if let Some(url) = set_api_url {
                config.set_api_base_url(url)?;
            }
            if let Some(url) = set_static_url {
                config.set_static_base_url(url)?;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  API URL: {}", config.api_base_url());
                println!("  画像URL: {}", config.static_base_url);
                println!("  サムネイル枚数: {}〜{}", config.thumbnail_min, config.thumbnail_max);
                println!(
                    "  タイムアウト: {}",
                    config.timeout_seconds.map(|s| format!("{}秒", s)).unwrap_or_else(|| "なし".into())
                );
                println!("  ログイン: {}", session.display_name().unwrap_or_else(|| "未ログイン".into()));
            }
        }
    }

    Ok(())
}
