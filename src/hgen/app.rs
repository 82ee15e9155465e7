// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashgen
// File: app.rs
// Author: hashgen maintainers

use crate::hgen::digest::Digest;
use crate::hgen::engine::{EngineConfig, BLOCK_SIZE};
use crate::hgen::error::DigestError;
use crate::hgen::output::{
	render, DigestReport, DigestSource, OutputFormat,
};
use crate::hgen::progress::{
	ProgressConfig, ProgressEmitter, ProgressMode,
};
use crate::hgen::registry::AlgorithmRegistry;
use crate::hgen::service::DigestService;
use crate::hgen::weak;
use clap::{crate_name, Arg, ArgAction, ArgMatches};
use clap_complete::{generate, Generator, Shell};
use std::error::Error;
use std::path::Path;
use strum::IntoEnumIterator;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
  hgen text -a sha256 'abc'           Hash a string
  hgen file -a sha3-256 -i 3 <PATH>   Hash a file, then re-hash it three times
  hgen text --verify <HEX> 'abc'      Check a string against a known digest
{usage-heading} {usage}

{all-args}{after-help}
";

pub const DEFAULT_ALGORITHM: &str = "sha256";

const LICENSE_NOTICE: &str = "\
This program comes with ABSOLUTELY NO WARRANTY.
It is free software, distributed under the terms of the MIT license.";

/// Options shared by the `text` and `file` subcommands.
#[derive(Clone, Debug)]
struct DigestRequest {
	algorithm: String,
	iterations: u64,
	show_chain: bool,
	reference: Option<String>,
	format: OutputFormat,
	quiet: bool,
}

impl DigestRequest {
	fn from_matches(matches: &ArgMatches) -> Self {
		Self {
			algorithm: matches
				.get_one::<String>("algorithm")
				.cloned()
				.unwrap_or_else(|| DEFAULT_ALGORITHM.to_string()),
			iterations: matches
				.get_one::<u64>("iterations")
				.copied()
				.unwrap_or(0),
			show_chain: matches.get_flag("show-chain"),
			reference: matches.get_one::<String>("verify").cloned(),
			format: matches
				.get_one::<OutputFormat>("output")
				.copied()
				.unwrap_or(OutputFormat::Hex),
			quiet: matches.get_flag("quiet"),
		}
	}
}

fn digest_args(cmd: clap::Command) -> clap::Command {
	let formats: Vec<&str> =
		OutputFormat::iter().map(OutputFormat::canonical_name).collect();
	cmd.arg(
		Arg::new("algorithm")
			.short('a')
			.long("algorithm")
			.help("Digest algorithm identifier (see `hgen list`)")
			.default_value(DEFAULT_ALGORITHM),
	)
	.arg(
		Arg::new("iterations")
			.short('i')
			.long("iterations")
			.value_parser(clap::value_parser!(u64))
			.help("Re-hash the digest this many times"),
	)
	.arg(
		Arg::new("show-chain")
			.long("show-chain")
			.help("Print every intermediate digest of the chain")
			.action(ArgAction::SetTrue),
	)
	.arg(
		Arg::new("verify")
			.long("verify")
			.value_name("DIGEST")
			.help("Compare the final digest with this hex value"),
	)
	.arg(
		Arg::new("output")
			.short('o')
			.long("output")
			.value_parser(clap::value_parser!(OutputFormat))
			.help(format!("Output format ({})", formats.join(", ")))
			.default_value("hex"),
	)
	.arg(
		Arg::new("quiet")
			.short('q')
			.long("quiet")
			.help("Print only the digest (or true/false when verifying)")
			.action(ArgAction::SetTrue),
	)
}

pub fn build_cli() -> clap::Command {
	clap::Command::new("hgen")
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name("hgen")
		.version(clap::crate_version!())
		.author(clap::crate_authors!())
		.about("Compute, chain and verify message digests")
		.subcommand_required(true)
		.arg_required_else_help(true)
		.arg(
			Arg::new("algorithms")
				.long("algorithms")
				.env("HGEN_ALGORITHMS")
				.value_delimiter(',')
				.global(true)
				.help("Restrict the available algorithms to this comma separated list"),
		)
		.subcommand(
			clap::command!("list")
				.about("List the digest algorithms available on this machine")
				.arg(
					Arg::new("long")
						.short('l')
						.long("long")
						.help("Show display name, output size and weak marker")
						.action(ArgAction::SetTrue),
				),
		)
		.subcommand(digest_args(
			clap::command!("text")
				.about("Hash a provided string")
				.arg(
					Arg::new("input")
						.help("Text to hash (UTF-8)")
						.required(true),
				),
		))
		.subcommand(digest_args(
			clap::command!("file")
				.about("Hash the contents of a file")
				.arg(
					Arg::new("path")
						.help("File to hash")
						.required(true),
				)
				.arg(
					Arg::new("block-size")
						.long("block-size")
						.value_parser(clap::value_parser!(usize))
						.help("Bytes read per chunk")
						.default_value("65536"),
				)
				.arg(
					Arg::new("progress")
						.long("progress")
						.value_parser(clap::value_parser!(ProgressMode))
						.help("Report progress on stderr")
						.default_value("auto"),
				),
		))
		.subcommand(
			clap::command!("license")
				.about("Print version and license information"),
		)
		.subcommand(
			clap::command!("completions")
				.about("Generate shell completions")
				.arg(
					Arg::new("SHELL")
						.required(true)
						.value_parser(clap::value_parser!(Shell))
						.help("Shell to generate completions for"),
				),
		)
}

fn build_registry(
	matches: &ArgMatches,
) -> Result<AlgorithmRegistry, DigestError> {
	match matches.get_many::<String>("algorithms") {
		Some(names) => AlgorithmRegistry::with_capabilities(names),
		None => Ok(AlgorithmRegistry::builtin()),
	}
}

fn handle_list(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let registry = build_registry(matches)?;
	let long = matches.get_flag("long");
	for algorithm in registry.algorithms() {
		if !long {
			println!("{}", algorithm.identifier());
			continue;
		}
		let bits = algorithm
			.output_size()
			.map(|bytes| (bytes * 8).to_string())
			.unwrap_or_else(|| "-".to_string());
		let marker = if algorithm.metadata.weak { "weak" } else { "" };
		println!(
			"{:<12} {:<18} {:>5} bits {}",
			algorithm.identifier(),
			algorithm.metadata.display_name,
			bits,
			marker
		);
	}
	Ok(())
}

/// Resolves the algorithm up front so unknown names fail before any
/// input is read, and warns about weak choices.
fn prepare(
	service: &DigestService,
	request: &mut DigestRequest,
) -> Result<(), DigestError> {
	let algorithm = service.registry().resolve(&request.algorithm)?;
	request.algorithm = algorithm.identifier().to_string();
	if !request.quiet {
		if let Some(message) = weak::warning_for(algorithm.identifier()) {
			weak::emit_warning_banner(&message);
		}
	}
	Ok(())
}

fn build_report(
	service: &DigestService,
	request: &DigestRequest,
	source: DigestSource,
	path: Option<String>,
	digest: Digest,
) -> Result<DigestReport, DigestError> {
	let report = if request.iterations == 0 {
		DigestReport::new(source, path, digest, 0)
	} else if request.show_chain {
		let chain =
			service.chain(&request.algorithm, &digest, request.iterations)?;
		let (steps, last) = chain.into_parts();
		DigestReport::new(source, path, last, request.iterations)
			.with_chain(steps)
	} else {
		let last = service.chain_final(
			&request.algorithm,
			&digest,
			request.iterations,
		)?;
		DigestReport::new(source, path, last, request.iterations)
	};
	Ok(match &request.reference {
		Some(reference) => {
			let outcome = service.verify(&report.digest, reference);
			report.with_verification(outcome)
		}
		None => report,
	})
}

fn emit_report(
	report: &DigestReport,
	request: &DigestRequest,
) -> Result<(), Box<dyn Error>> {
	for line in render(report, request.format, request.quiet)? {
		println!("{}", line);
	}
	if report.matched() == Some(false) {
		std::process::exit(1);
	}
	Ok(())
}

fn handle_text(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let service = DigestService::new(
		build_registry(matches)?,
		Default::default(),
	);
	let mut request = DigestRequest::from_matches(matches);
	prepare(&service, &mut request)?;
	let input = matches
		.get_one::<String>("input")
		.map(String::as_str)
		.unwrap_or_default();
	let digest = service.digest_text(&request.algorithm, input)?;
	let report =
		build_report(&service, &request, DigestSource::Text, None, digest)?;
	emit_report(&report, &request)
}

fn handle_file(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let config = EngineConfig {
		block_size: matches
			.get_one::<usize>("block-size")
			.copied()
			.unwrap_or(BLOCK_SIZE),
	};
	let service =
		DigestService::with_config(build_registry(matches)?, config)?;
	let mut request = DigestRequest::from_matches(matches);
	prepare(&service, &mut request)?;
	let path = matches
		.get_one::<String>("path")
		.map(String::as_str)
		.unwrap_or_default();
	let progress = ProgressConfig {
		mode: matches
			.get_one::<ProgressMode>("progress")
			.copied()
			.unwrap_or(ProgressMode::Auto),
		..ProgressConfig::default()
	};

	let digest = if progress.should_emit_on_stderr(request.quiet) {
		let mut emitter = ProgressEmitter::new(progress);
		emitter.announce(path);
		let digest = service.digest_file_with_progress(
			&request.algorithm,
			Path::new(path),
			|chunk| emitter.record(chunk),
		)?;
		emitter.emit_final();
		digest
	} else {
		service.digest_file(&request.algorithm, Path::new(path))?
	};
	let report = build_report(
		&service,
		&request,
		DigestSource::File,
		Some(path.to_string()),
		digest,
	)?;
	emit_report(&report, &request)
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
	generate(
		gen,
		cmd,
		cmd.get_name().to_string(),
		&mut std::io::stdout(),
	);
}

pub fn run() -> Result<(), Box<dyn Error>> {
	let capp = build_cli();
	let m = capp.get_matches();

	match m.subcommand() {
		Some(("list", s)) => handle_list(s)?,
		Some(("text", s)) => handle_text(s)?,
		Some(("file", s)) => handle_file(s)?,
		Some(("license", _)) => {
			println!("{} {}", crate_name!(), clap::crate_version!());
			println!("{}", LICENSE_NOTICE);
		}
		Some(("completions", s)) => {
			if let Some(gen) = s.get_one::<Shell>("SHELL") {
				let mut capp = build_cli();
				print_completions(*gen, &mut capp);
			}
		}
		_ => {
			println!("No subcommand provided. Use --help for usage.");
		}
	}
	Ok(())
}
