use std::path::Path;

pub async fn resources(config_dir: &Path) -> anyhow::Result<()> {
    let config = super::load_config(config_dir)?;
    let client = super::build_client(&config)?;

    let resources = client.resources().await?;
    for resource in &resources {
        match &resource.name {
            Some(name) if *name != resource.slug => println!("{}\t{name}", resource.slug),
            _ => println!("{}", resource.slug),
        }
    }

    tracing::info!(count = resources.len(), project = %config.transifex.project, "listed resources");
    Ok(())
}
