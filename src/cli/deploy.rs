//! Deploy pipeline: resolve the file set, synchronize the destination,
//! then hand off to git.

use crate::{
    cli::DeployArgs,
    config::ProjectConfig,
    git::GitRepo,
    log, manifest, sync,
};
use anyhow::{Result, bail};

/// Run a full deployment.
///
/// Stops before touching anything if the destination directory does not
/// exist; deploying into a directory that was never cloned would create
/// an orphaned tree with no remote.
pub fn run(config: &ProjectConfig, args: &DeployArgs) -> Result<()> {
    let dest = config.dest_dir();
    if !dest.is_dir() {
        bail!("destination directory not found: {}", dest.display());
    }

    log!("deploy"; "source: {}", config.get_root().display());
    log!("deploy"; "destination: {}", dest.display());
    if args.dry_run {
        log!("deploy"; "dry-run mode, no files will be modified");
    }

    let repo = GitRepo::open(&dest)?;
    if !repo.is_repo() {
        log!("warning"; "destination is not a git repository, skipping git operations");
    }

    let files = manifest::collect(config);
    log!("deploy"; "{} file(s) to deploy", files.len());

    let stats = sync::sync_files(config, &files, args.dry_run)?;
    log!("deploy"; "copied {}, skipped {}", stats.copied, stats.skipped);

    let removed = sync::clean_orphans(config, &files, args.dry_run)?;
    if removed > 0 {
        log!("deploy"; "removed {removed} orphaned file(s)");
    }

    repo.stage_all(args.dry_run)?;
    if args.wants_commit() {
        repo.commit(&config.deploy.message, args.dry_run)?;
    }
    if args.push {
        repo.push(args.dry_run)?;
    }

    if args.dry_run {
        log!("deploy"; "dry-run complete");
    } else if args.wants_commit() {
        log!("deploy"; "deployment complete");
    } else {
        log!("deploy"; "files synchronized, review and commit with --commit");
    }

    Ok(())
}
