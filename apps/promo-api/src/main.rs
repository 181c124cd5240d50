use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = promo_api::Args::parse();

	promo_api::run(args).await
}
