use crate::infra::{seed_listings, InMemoryCredentialRepository};
use clap::Args;
use estate_guard::config::{AppConfig, PasswordHashConfig};
use estate_guard::error::AppError;
use estate_guard::identity::{ListingId, UserId};
use estate_guard::policies::address::{ListingDisclosureService, ListingView};
use estate_guard::policies::password_history::{
    Argon2Hasher, PasswordRotationError, PasswordRotationService,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Account used for the password rotation walkthrough.
    #[arg(long, default_value = "agent-claire")]
    pub(crate) user_id: String,
    /// Hash with minimal Argon2 cost instead of the configured cost.
    #[arg(long)]
    pub(crate) quick_hash: bool,
    /// Skip the listing disclosure portion of the demo.
    #[arg(long)]
    pub(crate) skip_listing: bool,
}

const ROTATION_SCRIPT: [&str; 8] = [
    "Balcony-2019",
    "Balcony-2020",
    "Balcony-2019",
    "Terrace-2021",
    "Garden-2022",
    "Loft-2023",
    "Studio-2024",
    "Balcony-2019",
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let hash_config = if args.quick_hash {
        PasswordHashConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    } else {
        AppConfig::load()?.password_hash
    };

    run_rotation_demo(&UserId::new(args.user_id), &hash_config)?;

    if !args.skip_listing {
        run_disclosure_demo();
    }

    Ok(())
}

fn run_rotation_demo(user_id: &UserId, hash_config: &PasswordHashConfig) -> Result<(), AppError> {
    let service = PasswordRotationService::new(
        Arc::new(InMemoryCredentialRepository::default()),
        Arc::new(Argon2Hasher::new(hash_config)?),
    );

    println!("Password rotation for {user_id}");

    let first = ROTATION_SCRIPT[0];
    match service.set_initial_password(user_id, first) {
        Ok(record) => println!("- set {first}: history {}", record.history.len()),
        Err(err) => println!("- set {first}: failed ({err})"),
    }

    for password in &ROTATION_SCRIPT[1..] {
        match service.change_password(user_id, password) {
            Ok(record) => println!(
                "- change to {password}: accepted, history {} (version {})",
                record.history.len(),
                record.version
            ),
            Err(PasswordRotationError::PasswordReused) => {
                println!("- change to {password}: rejected, used within the last five passwords")
            }
            Err(err) => println!("- change to {password}: failed ({err})"),
        }
    }

    Ok(())
}

fn run_disclosure_demo() {
    let (catalog, collaborations) = seed_listings();
    let service = ListingDisclosureService::new(Arc::new(catalog), Arc::new(collaborations));
    let listing_id = ListingId::new("listing-marais-01");

    println!("\nAddress disclosure for {listing_id}");
    let viewers = [
        ("owner", Some("agent-claire")),
        ("active collaborator", Some("agent-malik")),
        ("pending collaborator", Some("agent-sofia")),
        ("unrelated agent", Some("agent-tom")),
        ("anonymous visitor", None),
    ];

    for (label, viewer) in viewers {
        let viewer = viewer.map(UserId::new);
        match service.view(&listing_id, viewer.as_ref()) {
            Ok(view) => render_listing_view(label, &view),
            Err(err) => println!("- {label}: unavailable ({err})"),
        }
    }
}

fn render_listing_view(label: &str, view: &ListingView) {
    let scope = if view.location.full_address {
        "full"
    } else {
        "masked"
    };
    println!("- {label}: {} [{scope}]", view.location.display);
}
