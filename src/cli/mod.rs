use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "liteguard")]
#[command(version, about = "Catalog of on-device LiteGuard model variants", long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List every model variant in declaration order
	List {
		/// Print the descriptors as JSON
		#[arg(long)]
		json: bool,
	},

	/// Show one model with its download and inference settings
	Show {
		/// Model identifier (e.g., "LiteGuard_500MB")
		model: String,
	},

	/// Format a prompt the way the model's UI variant expects
	Prompt {
		/// Model identifier
		model: String,

		/// Prompt text
		#[arg(long)]
		text: String,
	},

	/// Validate registry invariants (unique paths and ids, URLs, sampling ranges)
	Check,

	/// Start the read-only HTTP API
	Serve {
		/// Port to listen on (defaults to settings.toml, then 8080)
		#[arg(long, env = "LITEGUARD_PORT")]
		port: Option<u16>,

		/// Host to bind to (defaults to settings.toml, then 127.0.0.1)
		#[arg(long, env = "LITEGUARD_HOST")]
		host: Option<String>,
	},
}
