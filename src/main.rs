use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use retrofit_tracker::booking::{BookingRequest, VisitKind, TIME_SLOTS};
use retrofit_tracker::config;
use retrofit_tracker::coordinator::CoordinatorError;
use retrofit_tracker::lifecycle::{ParticipantIntake, ParticipantStatus, Priority, PIPELINE};
use retrofit_tracker::persistence::SnapshotStore;
use retrofit_tracker::telemetry::init_telemetry;
use retrofit_tracker::workspace::{seed_snapshot, Workspace};
use retrofit_tracker::{NewUserAccount, UserRole};

#[derive(Parser)]
#[command(name = "retrofit-tracker")]
#[command(about = "Administrative coordination for residential energy-audit programs")]
#[command(
    long_about = "Retrofit Tracker moves participants through the audit pipeline (booking, \
                  audit, tech review, contractor quote, final audit, completion) and manages \
                  the rosters of advisors, booking agents, tech team, and contractors behind it."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the workspace snapshot
    Init {
        /// Overwrite an existing workspace
        #[arg(long, help = "Re-initialize even if a workspace snapshot exists")]
        force: bool,
    },
    /// List participants and their pipeline position
    List {
        /// Only show participants in this program
        #[arg(long, help = "Filter by program name")]
        program: Option<String>,
        /// Only show participants at this status
        #[arg(long, help = "Filter by pipeline status, e.g. READY_FOR_TECH_TEAM")]
        status: Option<String>,
    },
    /// Show one participant in full, including the audit trail
    Show { id: String },
    /// Enroll a new participant at the start of the pipeline
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        postal_code: String,
        #[arg(long, help = "Program name, e.g. 'Home Energy Assessment'")]
        program: String,
        #[arg(long, default_value = "Single Family")]
        property_type: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, help = "Priority: high, medium, or low")]
        priority: Option<String>,
    },
    /// Move a participant one pipeline position forward
    Advance {
        id: String,
        #[arg(long, help = "Recorded in the audit trail as the acting staff member")]
        actor: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Move a participant one pipeline position backward
    Revert {
        id: String,
        #[arg(long)]
        actor: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Administrative override: jump directly to any pipeline status
    SetStatus {
        id: String,
        /// Target status, e.g. READY_FOR_CONTRACTOR_QUOTE
        status: String,
        #[arg(long)]
        actor: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Place a participant's file on hold
    Hold {
        id: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Take a participant's file off hold
    Resume {
        id: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Book an audit visit and advance the participant
    Book {
        id: String,
        #[arg(long, help = "Energy advisor id from the roster")]
        advisor: String,
        #[arg(long, help = "Visit date, YYYY-MM-DD")]
        date: String,
        #[arg(long, help = "One of the offered slots, e.g. '10:00 AM'")]
        slot: String,
        #[arg(long, help = "Book the final audit instead of the initial one")]
        final_audit: bool,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Show a participant's status history
    History { id: String },
    /// Pipeline overview: participant counts per stage
    Status,
    /// List energy advisors
    Advisors,
    /// List booking agents
    BookingAgents,
    /// List tech team members
    TechTeam,
    /// List contractors
    Contractors,
    /// List programs
    Programs,
    /// List team-member accounts
    Users,
    /// Create a team-member account
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, help = "admin, energy-advisor, booking-agent, tech-team, or trainee")]
        role: String,
        #[arg(long, help = "Checked for length and discarded; accounts hold no credentials")]
        password: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config()?;
    init_telemetry(&cfg.observability.log_level, cfg.observability.json_logs)?;

    let store = SnapshotStore::new(&cfg.workspace.data_file);
    let default_actor = cfg.admin.default_actor.clone();

    tokio::runtime::Runtime::new()?.block_on(async {
        match cli.command {
            Commands::Init { force } => init_command(&store, force, cfg.workspace.seed_on_init).await,
            Commands::List { program, status } => list_command(&store, program, status).await,
            Commands::Show { id } => show_command(&store, &id).await,
            Commands::Add {
                first_name,
                last_name,
                email,
                phone,
                address,
                city,
                postal_code,
                program,
                property_type,
                notes,
                priority,
            } => {
                add_command(
                    &store,
                    ParticipantIntake {
                        first_name,
                        last_name,
                        email,
                        phone,
                        address,
                        city,
                        postal_code,
                        program,
                        property_type,
                        notes,
                        priority: priority.as_deref().map(parse_priority).transpose()?,
                    },
                )
                .await
            }
            Commands::Advance { id, actor, notes } => {
                transition_command(&store, &id, Transition::Advance, actor.or(default_actor), notes)
                    .await
            }
            Commands::Revert { id, actor, notes } => {
                transition_command(&store, &id, Transition::Revert, actor.or(default_actor), notes)
                    .await
            }
            Commands::SetStatus {
                id,
                status,
                actor,
                notes,
            } => {
                let target: ParticipantStatus = status
                    .parse()
                    .map_err(|e| anyhow!("{e}"))?;
                transition_command(
                    &store,
                    &id,
                    Transition::Jump(target),
                    actor.or(default_actor),
                    notes,
                )
                .await
            }
            Commands::Hold { id, actor } => {
                hold_command(&store, &id, true, actor.or(default_actor)).await
            }
            Commands::Resume { id, actor } => {
                hold_command(&store, &id, false, actor.or(default_actor)).await
            }
            Commands::Book {
                id,
                advisor,
                date,
                slot,
                final_audit,
                notes,
                actor,
            } => {
                book_command(
                    &store,
                    &id,
                    &advisor,
                    &date,
                    slot,
                    final_audit,
                    notes,
                    actor.or(default_actor),
                )
                .await
            }
            Commands::History { id } => history_command(&store, &id).await,
            Commands::Status => status_command(&store).await,
            Commands::Advisors => advisors_command(&store).await,
            Commands::BookingAgents => booking_agents_command(&store).await,
            Commands::TechTeam => tech_team_command(&store).await,
            Commands::Contractors => contractors_command(&store).await,
            Commands::Programs => programs_command(&store).await,
            Commands::Users => users_command(&store).await,
            Commands::AddUser {
                name,
                email,
                role,
                password,
            } => add_user_command(&store, name, email, &role, password).await,
        }
    })
}

enum Transition {
    Advance,
    Revert,
    Jump(ParticipantStatus),
}

fn parse_priority(value: &str) -> Result<Priority> {
    match value.to_lowercase().as_str() {
        "high" => Ok(Priority::High),
        "medium" => Ok(Priority::Medium),
        "low" => Ok(Priority::Low),
        other => Err(anyhow!("unknown priority {other:?}, expected high/medium/low")),
    }
}

fn parse_role(value: &str) -> Result<UserRole> {
    match value.to_lowercase().replace('_', "-").as_str() {
        "admin" => Ok(UserRole::Admin),
        "energy-advisor" => Ok(UserRole::EnergyAdvisor),
        "booking-agent" => Ok(UserRole::BookingAgent),
        "tech-team" => Ok(UserRole::TechTeam),
        "trainee" => Ok(UserRole::Trainee),
        other => Err(anyhow!(
            "unknown role {other:?}, expected admin/energy-advisor/booking-agent/tech-team/trainee"
        )),
    }
}

async fn open_workspace(store: &SnapshotStore) -> Result<Workspace> {
    Workspace::load(store)
        .await
        .with_context(|| format!("failed to load workspace from {:?}", store.path()))
}

async fn init_command(store: &SnapshotStore, force: bool, seed: bool) -> Result<()> {
    if store.exists() && !force {
        println!(
            "⚠️  Workspace already exists at {:?} — use --force to re-initialize",
            store.path()
        );
        return Ok(());
    }
    let snapshot = if seed {
        seed_snapshot()
    } else {
        Default::default()
    };
    store.save(&snapshot).await?;
    println!("✅ Workspace initialized at {:?}", store.path());
    if seed {
        println!(
            "   Seeded {} advisors, {} contractors, {} programs",
            snapshot.energy_advisors.len(),
            snapshot.contractors.len(),
            snapshot.programs.len()
        );
    }
    Ok(())
}

async fn list_command(
    store: &SnapshotStore,
    program: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let status_filter = status
        .map(|s| s.parse::<ParticipantStatus>())
        .transpose()
        .map_err(|e| anyhow!("{e}"))?;

    let mut participants = workspace.coordinator.list().await?;
    if let Some(program) = &program {
        participants.retain(|p| &p.program == program);
    }
    if let Some(status) = status_filter {
        participants.retain(|p| p.status == status);
    }

    if participants.is_empty() {
        println!("📭 No participants match");
        return Ok(());
    }
    println!("📋 {} participant(s):", participants.len());
    for p in participants {
        let hold = if p.on_hold { " [ON HOLD]" } else { "" };
        println!(
            "  {} — {} | {} | {}{}",
            p.id,
            p.full_name(),
            p.program,
            p.status.label(),
            hold
        );
    }
    Ok(())
}

async fn show_command(store: &SnapshotStore, id: &str) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let p = workspace.coordinator.find(id).await?;

    println!("👤 {} ({})", p.full_name(), p.id);
    println!("   Program:      {}", p.program);
    println!("   Status:       {}", p.status.label());
    println!("   On hold:      {}", if p.on_hold { "yes" } else { "no" });
    println!("   Email:        {}", p.email);
    println!("   Phone:        {}", p.phone);
    if !p.address.is_empty() {
        println!("   Address:      {}, {} {}", p.address, p.city, p.postal_code);
    }
    println!("   Property:     {}", p.property_type);
    if let Some(advisor) = &p.assigned_advisor {
        println!("   Advisor:      {advisor}");
    }
    if !p.notes.is_empty() {
        println!("   Notes:        {}", p.notes);
    }
    println!("   Enrolled:     {}", p.created_at.format("%Y-%m-%d"));
    println!(
        "   History:      {} status change(s), {} hold event(s)",
        p.status_history.len(),
        p.hold_history.len()
    );
    Ok(())
}

async fn add_command(store: &SnapshotStore, intake: ParticipantIntake) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let participant = workspace.coordinator.enroll(intake).await?;
    workspace.persist(store).await?;
    println!(
        "✅ Enrolled {} ({}) at {}",
        participant.full_name(),
        participant.id,
        participant.status.label()
    );
    Ok(())
}

async fn transition_command(
    store: &SnapshotStore,
    id: &str,
    transition: Transition,
    actor: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let actor = actor.as_deref();
    let notes = notes.as_deref();

    let result = match transition {
        Transition::Advance => workspace.coordinator.advance(id, actor, notes).await,
        Transition::Revert => workspace.coordinator.revert(id, actor, notes).await,
        Transition::Jump(target) => {
            workspace
                .coordinator
                .set_status(id, target, actor, notes)
                .await
        }
    };

    match result {
        Ok(p) => {
            workspace.persist(store).await?;
            println!("✅ {} is now at {}", p.full_name(), p.status.label());
            Ok(())
        }
        // Out-of-bounds moves are expected operator input, not failures
        Err(CoordinatorError::InvalidState(e)) => {
            println!("⚠️  {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn hold_command(
    store: &SnapshotStore,
    id: &str,
    on_hold: bool,
    actor: Option<String>,
) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let p = workspace
        .coordinator
        .toggle_hold(id, on_hold, actor.as_deref())
        .await?;
    workspace.persist(store).await?;
    if on_hold {
        println!("⏸️  {} placed on hold (still at {})", p.full_name(), p.status.label());
    } else {
        println!("▶️  {} resumed at {}", p.full_name(), p.status.label());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn book_command(
    store: &SnapshotStore,
    id: &str,
    advisor: &str,
    date: &str,
    slot: String,
    final_audit: bool,
    notes: Option<String>,
    actor: Option<String>,
) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date {date:?}, expected YYYY-MM-DD"))?;

    let request = BookingRequest {
        participant_id: id.to_string(),
        advisor_id: advisor.to_string(),
        date,
        time_slot: slot,
        visit: if final_audit {
            VisitKind::FinalAudit
        } else {
            VisitKind::InitialAudit
        },
        notes,
    };

    match workspace.booking_desk.book(request, actor.as_deref()).await {
        Ok((booking, participant)) => {
            workspace.persist(store).await?;
            println!(
                "📅 Booked {} for {} at {} — now {}",
                participant.full_name(),
                booking.date,
                booking.time_slot,
                participant.status.label()
            );
            Ok(())
        }
        Err(e) => {
            println!("⚠️  Booking rejected: {e}");
            println!("   Offered slots: {}", TIME_SLOTS.join(", "));
            Ok(())
        }
    }
}

async fn history_command(store: &SnapshotStore, id: &str) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let p = workspace.coordinator.find(id).await?;

    println!("📜 Status history for {} ({}):", p.full_name(), p.id);
    if p.status_history.is_empty() {
        println!("  (no transitions yet — enrolled at {})", p.status.label());
    }
    for entry in &p.status_history {
        let actor = entry.actor.as_deref().unwrap_or("-");
        let notes = entry.notes.as_deref().unwrap_or("");
        println!(
            "  {}  {:<28} by {}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.status.label(),
            actor,
            notes
        );
    }
    if !p.hold_history.is_empty() {
        println!("⏸️  Hold events:");
        for event in &p.hold_history {
            println!(
                "  {}  {}  by {}",
                event.timestamp.format("%Y-%m-%d %H:%M"),
                if event.on_hold { "ON HOLD" } else { "RESUMED" },
                event.actor.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

async fn status_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let participants = workspace.coordinator.list().await?;

    println!("📊 Pipeline overview ({} participants):", participants.len());
    for stage in PIPELINE {
        let count = participants.iter().filter(|p| p.status == stage).count();
        let bar = "█".repeat(count.min(40));
        println!("  {:<28} {:>3} {}", stage.label(), count, bar);
    }
    let on_hold = participants.iter().filter(|p| p.on_hold).count();
    if on_hold > 0 {
        println!("  {:<28} {:>3}", "ON HOLD (flag)", on_hold);
    }
    Ok(())
}

async fn advisors_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let advisors = workspace.advisors.list().await;
    println!("🧑‍🔧 {} energy advisor(s):", advisors.len());
    for a in advisors {
        println!(
            "  {} — {} ({:?}, {:?}) | {} | areas: {}",
            a.id,
            a.name,
            a.certification_level,
            a.status,
            a.email,
            a.service_areas.join(", ")
        );
    }
    Ok(())
}

async fn booking_agents_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let agents = workspace.booking_agents.list().await;
    println!("☎️  {} booking agent(s):", agents.len());
    for a in agents {
        println!(
            "  {} — {} ({:?}) | {} | programs: {}",
            a.id,
            a.name,
            a.status,
            a.email,
            a.programs_booked.join(", ")
        );
    }
    Ok(())
}

async fn tech_team_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let members = workspace.tech_team.list().await;
    println!("🔬 {} tech team member(s):", members.len());
    for m in members {
        println!(
            "  {} — {}, {} ({:?}) | {}",
            m.id, m.name, m.title, m.status, m.email
        );
    }
    Ok(())
}

async fn contractors_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let contractors = workspace.contractors.list().await;
    println!("🏗️  {} contractor(s):", contractors.len());
    for c in contractors {
        let preferred = if c.is_preferred { " ⭐" } else { "" };
        println!(
            "  {} — {}{} | contact: {} | services: {}",
            c.id,
            c.name,
            preferred,
            c.contact_person,
            c.services_offered.join(", ")
        );
    }
    Ok(())
}

async fn programs_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let programs = workspace.programs.list().await;
    println!("🗂️  {} program(s):", programs.len());
    for p in programs {
        println!("  {} — {} ({:?})", p.id, p.name, p.status);
        println!("      {}", p.description);
    }
    Ok(())
}

async fn users_command(store: &SnapshotStore) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let accounts = workspace.accounts.list().await;
    println!("👥 {} account(s):", accounts.len());
    for a in accounts {
        println!("  {} — {} | {} | {}", a.id, a.name, a.email, a.role.label());
    }
    Ok(())
}

async fn add_user_command(
    store: &SnapshotStore,
    name: String,
    email: String,
    role: &str,
    password: String,
) -> Result<()> {
    let workspace = open_workspace(store).await?;
    let role = parse_role(role)?;
    match workspace
        .accounts
        .create(NewUserAccount {
            name,
            email,
            role,
            password,
        })
        .await
    {
        Ok(account) => {
            workspace.persist(store).await?;
            println!("✅ Account created for {} ({})", account.name, account.role.label());
            Ok(())
        }
        Err(e) => {
            println!("⚠️  {e}");
            Ok(())
        }
    }
}
