use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use seqmark::fasta;
use seqmark::logger;
use seqmark::pipeline::{self, Request};
use seqmark::prompt::Prompter;
use seqmark::Result;

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "seqmark", about = "Random DNA sequence with an embedded name, saved as FASTA with composition statistics")]
struct Opt {
    /// Sequence length (positive integer); asked for when omitted
    #[structopt(short, long, parse(try_from_str = pipeline::parse_length))]
    length: Option<usize>,

    /// Sequence ID, used in the header and as the file name
    #[structopt(short, long)]
    id: Option<String>,

    /// Free text description for the header
    #[structopt(short, long)]
    description: Option<String>,

    /// Name embedded in the sequence and left out of the statistics
    #[structopt(short, long, alias = "name")]
    marker: Option<String>,

    /// Directory the FASTA file is written to
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    output_dir: PathBuf,

    /// Seed for reproducible output
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Print the document instead of writing a file
    #[structopt(long)]
    stdout: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn build_request(opt: &Opt) -> Result<Request> {
    // prompts must not end up in a document printed on stdout
    let prompt_out: Box<dyn Write> = if opt.stdout {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), prompt_out);

    let length = match opt.length {
        Some(length) => length,
        None => prompter.ask_length()?,
    };
    let id = match &opt.id {
        Some(id) => id.trim().to_owned(),
        None => prompter.ask_id()?,
    };
    let description = match &opt.description {
        Some(description) => description.trim().to_owned(),
        None => prompter.ask_description()?,
    };
    let marker = match &opt.marker {
        Some(marker) => marker.trim().to_owned(),
        None => prompter.ask_marker()?,
    };

    Request::new(length, &id, &description, &marker)
}

fn run(opt: &Opt) -> Result<()> {
    let request = build_request(opt)?;

    let mut rng = match opt.seed {
        Some(seed) => {
            info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let output = pipeline::run(&request, &mut rng)?;

    if opt.stdout {
        print!("{}", output.document);
        io::stdout().flush()?;
        eprintln!("Sequence statistics:\n{}", output.stats);
    } else {
        let path = fasta::write_document(&opt.output_dir, request.id(), &output.document)?;
        println!("\nThe sequence was saved to the file {}", path.display());
        println!("Sequence statistics:\n{}", output.stats);
    }

    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    if let Err(e) = logger::init_logger(logger::level_from_verbosity(opt.verbose)) {
        eprintln!("Error initializing logger: {}", e);
    }

    if let Err(e) = run(&opt) {
        error!("{}", e);
        process::exit(1);
    }
}
