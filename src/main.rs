use std::convert::TryFrom;
use std::process::exit;
use usergraph::engine::config::Configuration;
use usergraph::engine::store::Store;
use usergraph::engine::Engine;
use usergraph::server::{bind_addr_from_env, bind_port_from_env, Server};
use usergraph::Error;

async fn run(matches: clap::ArgMatches<'_>) -> Result<(), Error> {
    let config = match matches.value_of("CONFIG") {
        Some(cfn) => Configuration::from_file(cfn)?,
        None => Configuration::sample(),
    };
    let engine = Engine::new(Store::try_from(config)?).build()?;

    if matches.is_present("sdl") {
        print!("{}", engine.sdl());
        return Ok(());
    }

    let bind_addr = matches
        .value_of("bind")
        .map(|s| s.to_string())
        .unwrap_or_else(|| bind_addr_from_env("USERGRAPH_BIND_ADDR"));
    let bind_port = matches
        .value_of("port")
        .map(|s| s.to_string())
        .unwrap_or_else(|| bind_port_from_env("USERGRAPH_BIND_PORT"));

    Server::new(engine)
        .with_bind_addr(bind_addr)
        .with_bind_port(bind_port)
        .run()
        .await
}

#[actix_web::main]
async fn main() {
    env_logger::init();

    let matches = clap::App::new("usergraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serves an in-memory graph of users through GraphQL")
        .arg(
            clap::Arg::with_name("CONFIG")
                .help("Path to a YAML file of users to serve instead of the built-in sample"),
        )
        .arg(
            clap::Arg::with_name("bind")
                .long("bind")
                .takes_value(true)
                .help("Address to bind to [env: USERGRAPH_BIND_ADDR] [default: 127.0.0.1]"),
        )
        .arg(
            clap::Arg::with_name("port")
                .long("port")
                .short("p")
                .takes_value(true)
                .help("Port to bind to [env: USERGRAPH_BIND_PORT] [default: 8081]"),
        )
        .arg(
            clap::Arg::with_name("sdl")
                .long("sdl")
                .help("Print the GraphQL schema and exit"),
        )
        .get_matches();

    if let Err(e) = run(matches).await {
        eprintln!("usergraph: {}", e);
        exit(1);
    }
}
