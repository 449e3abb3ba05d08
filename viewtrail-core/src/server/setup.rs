use crate::conf::Config;
use crate::enrichment::geo::IpApiResolver;
use crate::gateway::ViewGateway;
use crate::interceptor::ViewInterceptor;
use crate::pipeline::EmissionPipeline;
use crate::respond::RouteTable;
use crate::sink::TracingSink;
use anyhow::{Context, Result};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Run the Pingora server with the given configuration. Blocks forever.
pub fn run(config: Config) -> Result<()> {
    let pipeline = build_pipeline(&config)?;
    let server = build_server(&config, pipeline)?;

    tracing::info!(
        listen = %config.listen_addr(),
        env = ?config.app_env,
        trust_proxy = config.proxy.enabled,
        parse_user_agent = config.parse_user_agent,
        "viewtrail listening"
    );

    server.run_forever();
}

/// Emission pipeline backed by the configured lookup endpoint and the tracing sink.
pub fn build_pipeline(config: &Config) -> Result<Arc<EmissionPipeline>> {
    let resolver = IpApiResolver::new(&config.geo)?;

    Ok(Arc::new(EmissionPipeline::new(
        Arc::new(resolver),
        Arc::new(TracingSink::new()),
        config.parse_user_agent,
    )))
}

/// Build the Pingora server around an existing pipeline.
pub fn build_server(config: &Config, pipeline: Arc<EmissionPipeline>) -> Result<Server> {
    let mut server = if let Some(threads) = config.server_threads {
        tracing::debug!(
            threads,
            "Creating Pingora server with overridden worker threads"
        );
        let mut conf =
            ServerConf::new().context("could not construct pingora server configuration")?;
        conf.threads = threads;
        Server::new_with_opt_and_conf(None, conf)
    } else {
        // "None" is required here to truly tell Pingora to use its default settings.
        Server::new(None)?
    };

    server.bootstrap();

    let routes = RouteTable::standard();
    tracing::debug!(routes = routes.len(), "Static routes registered");

    let gateway = ViewGateway::new(routes, config.proxy.clone())
        .with_interceptor(Arc::new(ViewInterceptor::new(pipeline)));

    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&config.listen_addr());

    server.add_service(svc);

    Ok(server)
}
