use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use u_assign::hungarian::HungarianSolver;
use u_assign::report::{self, Palette};
use u_assign::roster::{LoaderConfig, Roster};

#[derive(Parser)]
#[command(name = "project-assigner")]
#[command(about = "Assign associates to project vacancies by ranked preference")]
#[command(version)]
struct Cli {
    #[arg(default_value = "Projects.csv", help = "Projects file: name, vacancies, tech")]
    projects: PathBuf,
    #[arg(
        default_value = "Preferences.csv",
        help = "Preferences file: associate name, associate id, picks..."
    )]
    preferences: PathBuf,
    #[arg(long, short, default_value = report::DEFAULT_OUTPUT, help = "Where to write the assignments")]
    output: PathBuf,
    #[arg(long, default_value_t = 1, help = "Vacancies assumed when a project gives none")]
    default_vacancies: usize,
    #[arg(long, help = "Print the cost matrix before solving")]
    show_matrix: bool,
    #[arg(long, help = "Disable colored output")]
    no_color: bool,
    #[arg(long, short, action = ArgAction::Count, help = "More log output (-v info, -vv debug)")]
    verbose: u8,
}

enum Outcome {
    Assigned,
    InvalidData,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(Outcome::Assigned) => ExitCode::SUCCESS,
        Ok(Outcome::InvalidData) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<Outcome> {
    let palette = Palette::new(!cli.no_color);
    let config = LoaderConfig::default().with_default_vacancies(cli.default_vacancies);

    println!(
        "\n{}\n\t{}\n\t{}\n",
        palette.bold("Using input files:"),
        palette.info(&format!("Projects = {}", cli.projects.display())),
        palette.info(&format!("Picks = {}", cli.preferences.display())),
    );

    let roster = Roster::load(&cli.projects, &cli.preferences, &config)
        .context("failed to load roster")?;

    println!("{}", palette.bold("Loading projects"));
    print_lines(&report::render_projects(&roster.projects), |l| palette.info(l));
    println!("\n{}", palette.bold("Loading associate picks"));
    print_lines(&report::render_picks(&roster.picks, &roster.projects), |l| palette.info(l));

    let diagnostics = report::render_diagnostics(&roster.report, palette);
    if !diagnostics.is_empty() {
        println!();
        print_lines(&diagnostics, str::to_owned);
    }

    if !roster.is_valid() {
        println!(
            "\n{}",
            palette.fail(
                "Some input data is malformed. Please fix this before moving forward.\n\
                 Such issues are prefaced with \"FixMe\" in the output above."
            )
        );
        return Ok(Outcome::InvalidData);
    }

    let matrix = roster.cost_matrix().context("cannot build cost matrix")?;
    if cli.show_matrix {
        println!("\n{}", palette.bold("Cost matrix (D = not picked)"));
        print!("{matrix}");
    }

    println!("\n{}", palette.bold("Computing assignments"));
    let assignment = HungarianSolver::solve(&matrix);
    print_lines(&report::render_assignments(&roster, &assignment), |l| palette.ok(l));

    let forced = assignment.infeasible_rows();
    if !forced.is_empty() {
        println!();
        for row in forced {
            let name = roster.picks.get(row).map_or("?", |a| a.name.as_str());
            let outcome = if assignment.col_for_row(row).is_some() {
                "the assignment above is a placeholder"
            } else {
                "they were left unassigned"
            };
            println!(
                "\t{}",
                palette.warn(&format!(
                    "Wrn: {name} could not be given any of their picks; {outcome}."
                ))
            );
        }
    }
    println!(
        "\n\t{}",
        palette.info(&format!("Total cost: {}", assignment.total_cost))
    );

    println!("\n{}", palette.bold("Writing assignments to file"));
    report::write_assignments(&cli.output, &roster, &assignment)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    println!(
        "{}",
        palette.ok(&format!(
            "\nSuccessfully wrote assignments to: {}",
            cli.output.display()
        ))
    );

    Ok(Outcome::Assigned)
}

fn print_lines(lines: &[String], paint: impl Fn(&str) -> String) {
    for line in lines {
        println!("\t{}", paint(line));
    }
}
