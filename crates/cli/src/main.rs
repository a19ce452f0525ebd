use clap::{Parser, Subcommand};
use medvida_catalog::{Catalog, Specialty};
use medvida_core::views::{CheckoutView, DoctorProfileView, DoctorSelectionView};
use medvida_core::{Intent, Session, SessionConfig, SessionHandle, SessionSnapshot, TransitionTimings};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "medvida")]
#[command(about = "MedVida booking catalog and walkthrough CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List specialties
    Specialties,
    /// List doctors
    Doctors {
        /// Only doctors of this specialty (key, English name or label)
        #[arg(long)]
        specialty: Option<String>,
    },
    /// Show one doctor
    Doctor {
        /// Doctor id
        id: String,
    },
    /// List subscription plans
    Plans,
    /// List patient testimonials
    Testimonials,
    /// Validate a catalog file
    CheckCatalog {
        /// Path to the YAML catalog
        path: PathBuf,
    },
    /// Run a scripted booking through a live session
    Walkthrough {
        /// Use short transition timings
        #[arg(long)]
        fast: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("medvida=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();
    let config = SessionConfig::from_lookup(|key| std::env::var(key).ok(), today)?;

    match cli.command {
        Some(Commands::Specialties) => {
            let catalog = config.load_catalog()?;
            for info in catalog.specialties() {
                println!(
                    "{} {} ({}): from {}, rating {} ({} reviews), {} doctors",
                    info.icon,
                    info.specialty,
                    info.specialty.key(),
                    info.min_price,
                    info.rating,
                    info.reviews,
                    info.available_doctors
                );
            }
        }
        Some(Commands::Doctors { specialty }) => {
            let catalog = config.load_catalog()?;
            let filter = specialty.map(|s| s.parse::<Specialty>()).transpose()?;
            let doctors: Vec<_> = catalog
                .doctors()
                .iter()
                .filter(|d| filter.is_none_or(|s| d.specialty == s))
                .collect();
            if doctors.is_empty() {
                println!("No doctors found.");
            }
            for doctor in doctors {
                println!(
                    "ID: {}, Name: {}, Specialty: {}, Price: {}, Next: {}",
                    doctor.id, doctor.name, doctor.specialty, doctor.price, doctor.availability
                );
            }
        }
        Some(Commands::Doctor { id }) => {
            let catalog = config.load_catalog()?;
            match catalog.doctor(&id) {
                Some(doctor) => {
                    println!("{} ({})", doctor.name, doctor.license);
                    println!("{}", doctor.specialty);
                    println!(
                        "Rating: {} ({} reviews)",
                        doctor.rating, doctor.review_count
                    );
                    println!("Price: {}", doctor.price);
                    println!("Next availability: {}", doctor.availability);
                    println!("{}", doctor.bio);
                    for line in doctor.education.iter().chain(&doctor.certifications) {
                        println!("  - {line}");
                    }
                }
                None => eprintln!("No doctor with id {id}"),
            }
        }
        Some(Commands::Plans) => {
            let catalog = config.load_catalog()?;
            for plan in catalog.plans() {
                let flag = if plan.recommended { " [recomendado]" } else { "" };
                println!("{}{}: {}/mês, {}", plan.name, flag, plan.price, plan.description);
                for benefit in &plan.benefits {
                    println!("  - {benefit}");
                }
            }
        }
        Some(Commands::Testimonials) => {
            let catalog = config.load_catalog()?;
            for testimonial in catalog.testimonials() {
                println!(
                    "{} ({}): \"{}\"",
                    testimonial.name, testimonial.rating, testimonial.text
                );
            }
        }
        Some(Commands::CheckCatalog { path }) => match Catalog::load(&path) {
            Ok(catalog) => println!(
                "{} is valid: {} specialties, {} doctors, {} plans",
                path.display(),
                catalog.specialties().len(),
                catalog.doctors().len(),
                catalog.plans().len()
            ),
            Err(e) => {
                eprintln!("Error checking catalog: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Walkthrough { fast }) => {
            let config = if fast {
                config.with_timings(TransitionTimings {
                    draw: Duration::from_millis(20),
                    settle: Duration::from_millis(5),
                    fade: Duration::ZERO,
                    startup: Duration::ZERO,
                })
            } else {
                config
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(walkthrough(config))?;
        }
        None => {}
    }

    Ok(())
}

fn print_settled(snapshot: &SessionSnapshot) {
    let selection = snapshot.state.selection();
    println!(
        "-> {} (specialty: {}, doctor: {}, time: {})",
        snapshot.state.current_page(),
        selection
            .selected_specialty()
            .map_or("-", |s| s.label()),
        selection
            .selected_doctor()
            .map_or("-", |d| d.name.as_str()),
        selection.booking_time().unwrap_or("-")
    );
}

async fn step(handle: &SessionHandle, intent: Intent) -> Result<SessionSnapshot, Box<dyn std::error::Error>> {
    println!("{}", intent.name());
    handle.dispatch(intent)?;
    let snapshot = handle.settled().await?;
    print_settled(&snapshot);
    Ok(snapshot)
}

async fn walkthrough(config: SessionConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Arc::new(config.load_catalog()?);
    let (handle, task) = Session::spawn(config.timings());
    let mut notices = handle.notices();

    print_settled(&handle.settled().await?);

    let specialty = catalog
        .specialties()
        .first()
        .map(|info| info.specialty)
        .ok_or("catalog lists no specialties")?;
    step(&handle, Intent::SelectSpecialty(specialty)).await?;

    let selection = DoctorSelectionView::new(specialty, &catalog);
    let doctor_id = selection
        .doctors()
        .first()
        .map(|d| d.id.as_str().to_string())
        .ok_or("no doctors for the first specialty")?;
    step(&handle, selection.view_profile(&doctor_id)?).await?;

    let settled = handle.snapshot();
    let doctor = settled
        .state
        .selection()
        .selected_doctor()
        .cloned()
        .ok_or("profile shown without a doctor")?;
    let mut profile = DoctorProfileView::new(doctor.clone(), &catalog, config.calendar_anchor());
    let slot = profile.slots()[0];
    profile.choose_slot(slot)?;
    let intent = profile.confirm().ok_or("no slot chosen")?;
    let snapshot = step(&handle, intent).await?;

    let checkout = CheckoutView::new(
        doctor,
        snapshot.state.selection().booking_time(),
        config.reservation_hold(),
    );
    println!(
        "checkout: {} with {}, {} via {}, slot held for {}",
        checkout.booking_time(),
        checkout.doctor().name,
        checkout.total(),
        checkout.payment_method(),
        checkout.countdown().label()
    );
    step(&handle, checkout.confirm()).await?;

    while let Ok(notice) = notices.try_recv() {
        println!("{notice}");
    }

    drop(handle);
    task.await?;
    Ok(())
}
