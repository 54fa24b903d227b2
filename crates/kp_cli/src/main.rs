use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use kp_config::KpConfig;
use kp_core::SyntheticEphemeris;
use kp_search::{
    BirthInput, Direction, NatalContext, PredictRequest, birth_balance_for_natal, build_natal,
    dasha_hierarchy_for_natal, dasha_snapshot_at, natal_summary, predict_event, transit_triggers,
};
use kp_time::{format_jd, parse_instant_jd};
use kp_vedic_base::dasha::{DashaHierarchy, DashaLevel, DashaPeriod, MAX_DASHA_LEVEL};
use kp_vedic_base::{
    ALL_GRAHAS, LordCycle, RashiLordship, cuspal_sub_lords, kp_position, sub_lord_spans,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kp", about = "KP astrology CLI: sub-lords, dashas and event windows")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Policy/engine TOML file (default: kp.toml or config/kp.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct BirthArgs {
    /// Birth instant with offset (YYYY-MM-DDThh:mm:ss+hh:mm)
    #[arg(long)]
    birth: String,
    /// Latitude in degrees (north positive)
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees (east positive)
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
}

impl BirthArgs {
    fn input(&self) -> BirthInput {
        BirthInput::new(self.birth.clone(), self.lat, self.lon)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Nakshatra, star lord and sub-lord of a sidereal longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Sub-lord of a longitude and the sub divisions of its nakshatra
    SubLord {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Natal chart with star and sub lords
    Natal {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Vimshottari dasha hierarchy, or the active periods at a date
    Dasha {
        #[command(flatten)]
        birth: BirthArgs,
        /// Query instant for snapshot mode (omit for hierarchy)
        #[arg(long)]
        at: Option<String>,
        /// Deepest level (0 = maha, 1 = antara, 2 = pratyantara)
        #[arg(long)]
        max_level: Option<u8>,
    },
    /// Cuspal sub-lords of the 12 houses
    Csl {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// House significators per graha
    Significators {
        #[command(flatten)]
        birth: BirthArgs,
        /// Houses listed per graha
        #[arg(long, default_value = "4")]
        top: usize,
    },
    /// Transit triggers against the natal chart
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// Transit instant (default: now)
        #[arg(long)]
        at: Option<String>,
        /// Aspect orb in degrees (default from config)
        #[arg(long)]
        orb: Option<f64>,
    },
    /// Rank dasha windows for an event
    PredictEvent {
        #[command(flatten)]
        birth: BirthArgs,
        /// Event policy: marriage, child, promotion, travel, ...
        #[arg(long)]
        event: String,
        /// Anchor instant (default: now)
        #[arg(long)]
        anchor: Option<String>,
        /// future, past or nearest
        #[arg(long, default_value = "future")]
        direction: String,
        /// Windows to list (default from config)
        #[arg(long)]
        limit: Option<usize>,
        /// Fail on unknown events instead of using the default policy
        #[arg(long)]
        strict: bool,
    },
    /// List the configured event policies
    Policies,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> KpConfig {
    let loaded = match path {
        Some(p) => KpConfig::from_file(p),
        None => KpConfig::from_default_location(),
    };
    let config = loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        std::process::exit(1);
    });
    if let Err(e) = config.engine.validate() {
        eprintln!("Invalid config: {e}");
        std::process::exit(1);
    }
    config
}

fn load_natal(provider: &SyntheticEphemeris, birth: &BirthArgs) -> NatalContext {
    build_natal(provider, &birth.input()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn parse_jd(s: &str) -> f64 {
    parse_instant_jd(s).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn fmt_jd(jd: f64) -> String {
    format_jd(jd).unwrap_or_else(|_| format!("JD {jd:.4}"))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

fn print_period(period: &DashaPeriod) {
    let indent = "  ".repeat(period.level as usize);
    println!(
        "{}{}: {} ({} - {}, {:.1} days)",
        indent,
        period.level.name(),
        period.lord,
        fmt_jd(period.start_jd),
        fmt_jd(period.end_jd),
        period.duration_days(),
    );
}

fn print_hierarchy(hierarchy: &DashaHierarchy) {
    for (lvl_idx, level) in hierarchy.levels.iter().enumerate() {
        let level_name = DashaLevel::from_u8(lvl_idx as u8)
            .map(|l| l.name())
            .unwrap_or("Unknown");
        println!("Level {} ({}) - {} periods:", lvl_idx, level_name, level.len());
        let display_count = level.len().min(50);
        for period in &level[..display_count] {
            println!(
                "  [{}] {} ({} - {}, {:.1} days)",
                period.order,
                period.lord,
                fmt_jd(period.start_jd),
                fmt_jd(period.end_jd),
                period.duration_days(),
            );
        }
        if level.len() > display_count {
            println!("  ... and {} more periods", level.len() - display_count);
        }
        println!();
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let json = cli.json;
    let cycle = LordCycle::vimshottari();
    let lordship = RashiLordship::classical();
    let provider = SyntheticEphemeris::new();

    match cli.command {
        Commands::Nakshatra { lon } => {
            let pos = kp_position(lon, &cycle, &lordship);
            if json {
                print_json(&pos);
            } else {
                println!(
                    "{} (index {}) in {} - {:.4} traversed",
                    pos.nakshatra.name(),
                    pos.nakshatra_index,
                    pos.rashi.name(),
                    pos.fraction
                );
                println!(
                    "Sign lord: {}  Star lord: {}  Sub lord: {}",
                    pos.sign_lord, pos.star_lord, pos.sub_lord
                );
            }
        }

        Commands::SubLord { lon } => {
            let pos = kp_position(lon, &cycle, &lordship);
            let spans = sub_lord_spans(pos.nakshatra_index, &cycle);
            if json {
                let rows: Vec<_> = spans
                    .iter()
                    .map(|s| {
                        serde_json::json!({
                            "lord": s.lord,
                            "start_deg": s.start,
                            "end_deg": s.end,
                        })
                    })
                    .collect();
                print_json(&serde_json::json!({
                    "longitude": pos.longitude,
                    "nakshatra": pos.nakshatra,
                    "star_lord": pos.star_lord,
                    "sub_lord": pos.sub_lord,
                    "subs": rows,
                }));
            } else {
                println!(
                    "{:.4} deg: {} star lord {}, sub lord {}",
                    pos.longitude,
                    pos.nakshatra.name(),
                    pos.star_lord,
                    pos.sub_lord
                );
                for s in &spans {
                    let mark = if s.lord == pos.sub_lord { "*" } else { " " };
                    println!(
                        "{mark} {:<8} {:>9.4} - {:>9.4} deg",
                        s.lord.to_string(),
                        s.start,
                        s.end
                    );
                }
            }
        }

        Commands::Natal { birth } => {
            let natal = load_natal(&provider, &birth);
            let summary = natal_summary(&natal, &cycle, &lordship);
            if json {
                print_json(&summary);
            } else {
                println!(
                    "Natal chart for {} (JD {:.5}), ascendant {:.4} deg, moon sign {}\n",
                    summary.birth_utc.to_rfc3339(),
                    summary.birth_jd,
                    summary.ascendant,
                    summary.moon_sign.map_or("-", |r| r.name())
                );
                println!(
                    "{:<8} {:>9} {:<10} {:<16} {:<8} {:<8} {:>5}",
                    "Graha", "Lon", "Rashi", "Nakshatra", "Star", "Sub", "House"
                );
                for g in &summary.grahas {
                    println!(
                        "{:<8} {:>9.4} {:<10} {:<16} {:<8} {:<8} {:>5}",
                        g.graha.to_string(),
                        g.longitude,
                        g.rashi.name(),
                        g.nakshatra.name(),
                        g.star_lord.to_string(),
                        g.sub_lord.to_string(),
                        g.house
                    );
                }
            }
        }

        Commands::Dasha { birth, at, max_level } => {
            let config = load_config(cli.config.as_ref());
            let natal = load_natal(&provider, &birth);
            let dasha = config.engine.dasha_config(cycle);
            let level = max_level.unwrap_or(config.engine.max_level).min(MAX_DASHA_LEVEL);
            debug!(level, "dasha command");

            if let Some(q) = at {
                let snapshot = dasha_snapshot_at(&natal, &dasha, parse_jd(&q), level)
                    .unwrap_or_else(|e| {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    });
                if json {
                    print_json(&snapshot);
                } else {
                    println!("Dasha snapshot at {q} for birth {}\n", birth.birth);
                    if snapshot.periods.is_empty() {
                        println!("(query lies outside the computed periods)");
                    }
                    for period in &snapshot.periods {
                        print_period(period);
                    }
                }
            } else {
                let hierarchy = dasha_hierarchy_for_natal(&natal, &dasha, level)
                    .unwrap_or_else(|e| {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    });
                if json {
                    print_json(&hierarchy);
                } else {
                    let balance = birth_balance_for_natal(&natal, &dasha).unwrap_or_else(|e| {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    });
                    println!(
                        "Vimshottari dasha for {}: moon {:.4} deg in {}, {} balance {:.3} y\n",
                        birth.birth,
                        balance.moon_longitude,
                        balance.nakshatra.name(),
                        balance.lord,
                        balance.balance_years
                    );
                    print_hierarchy(&hierarchy);
                }
            }
        }

        Commands::Csl { birth } => {
            let natal = load_natal(&provider, &birth);
            let csl = cuspal_sub_lords(&natal.cusps, &cycle);
            if json {
                let rows: Vec<_> = csl
                    .iter()
                    .zip(natal.cusps)
                    .enumerate()
                    .map(|(i, (lord, cusp))| {
                        serde_json::json!({ "house": i + 1, "cusp_deg": cusp, "sub_lord": lord })
                    })
                    .collect();
                print_json(&rows);
            } else {
                for (i, (lord, cusp)) in csl.iter().zip(natal.cusps).enumerate() {
                    println!("House {:>2}: {:>9.4} deg  sub lord {}", i + 1, cusp, lord);
                }
            }
        }

        Commands::Significators { birth, top } => {
            let natal = load_natal(&provider, &birth);
            let map = natal.significators(&cycle, &lordship).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
            if json {
                print_json(&map);
            } else {
                for g in ALL_GRAHAS {
                    let houses: Vec<String> = map
                        .top_houses(g, top)
                        .iter()
                        .map(|(h, w)| format!("{h} ({w:.0})"))
                        .collect();
                    println!("{:<8} {}", g.to_string(), houses.join(", "));
                }
            }
        }

        Commands::Transits { birth, at, orb } => {
            let config = load_config(cli.config.as_ref());
            let natal = load_natal(&provider, &birth);
            let at = at.unwrap_or_else(now_rfc3339);
            let orb = orb.unwrap_or(config.engine.transit_orb_deg);
            let triggers = transit_triggers(&natal, &provider, parse_jd(&at), orb, &lordship)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                });
            if json {
                print_json(&triggers);
            } else {
                println!("Transits at {at}:");
                println!("  Venus in natal 7th sign:        {}", triggers.venus_transit_7th);
                println!("  Saturn in natal 10th sign:      {}", triggers.saturn_in_10th);
                println!(
                    "  Jupiter aspecting 10th lord:    {}",
                    triggers.jupiter_aspecting_10th_lord
                );
            }
        }

        Commands::PredictEvent {
            birth,
            event,
            anchor,
            direction,
            limit,
            strict,
        } => {
            let config = load_config(cli.config.as_ref());
            let policies = config.policy_store().unwrap_or_else(|e| {
                eprintln!("Invalid policy: {e}");
                std::process::exit(1);
            });
            let direction: Direction = direction.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let mut request = PredictRequest::new(birth.input(), event).with_direction(direction);
            request.anchor = anchor;
            request.limit = limit;
            request.strict_policy = strict;

            let selection = predict_event(&provider, &request, &policies, &config.engine)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                });
            if json {
                print_json(&selection);
            } else {
                if let Some(summary) = selection.summary() {
                    println!("{summary}\n");
                }
                for w in &selection.windows {
                    let path: Vec<String> = [Some(w.maha), w.antar, w.pratyantar]
                        .iter()
                        .flatten()
                        .map(|p| p.lord.to_string())
                        .collect();
                    println!(
                        "#{:<2} {} - {}  score {:>7.3}  age {:.1}-{:.1}  {}",
                        w.rank,
                        w.start.format("%Y-%m-%d"),
                        w.end.format("%Y-%m-%d"),
                        w.score,
                        w.age_start,
                        w.age_end,
                        path.join(" / ")
                    );
                }
            }
        }

        Commands::Policies => {
            let config = load_config(cli.config.as_ref());
            let policies = config.policy_store().unwrap_or_else(|e| {
                eprintln!("Invalid policy: {e}");
                std::process::exit(1);
            });
            let list: Vec<_> = policies.names().map(|n| policies.resolve(n)).collect();
            if json {
                print_json(&list);
            } else {
                for p in list {
                    println!(
                        "{:<12} {:<18} +{:?} -{:?} ages {}-{}",
                        p.name, p.label, p.positive_houses, p.negative_houses, p.age_min, p.age_max
                    );
                }
            }
        }
    }
}
