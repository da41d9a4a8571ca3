use clap::{Parser, Subcommand};
use fanal::{analyze_function, examples};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Analyze a single-variable function and print the step-by-step report
  Analyze {
    /// The function expression, in terms of x
    expression: String,
    /// Optional x value to evaluate at (decimal, fraction, or constant)
    #[arg(long)]
    at: Option<String>,
  },
  /// List the built-in example functions
  Examples,
}

fn main() {
  let cli = Cli::parse();

  match cli.command {
    Commands::Analyze { expression, at } => {
      match analyze_function(&expression, at.as_deref()) {
        Ok(report) => println!("{}", report.render()),
        Err(e) => eprintln!("Error: {}", e),
      }
    }
    Commands::Examples => {
      for example in examples() {
        println!(
          "f(x) = {} | x = {} | {}",
          example.expression, example.x_value, example.description
        );
      }
    }
  }
}
