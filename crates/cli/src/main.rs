use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use ccm_core::{
    assessment_file::{read_submissions, score_submissions},
    assistant_reply, care_plan,
    config::{profile_from_env_value, strict_inputs_from_env_value},
    AsthmaInputs, CardiovascularInputs, CarePlanStyle, ConditionInputs, CopdInputs, CoreConfig,
    DiabetesInputs, Scorer,
};

#[derive(Parser)]
#[command(name = "ccm")]
#[command(about = "Chronic condition risk stratification and care planning CLI")]
struct Cli {
    #[command(flatten)]
    scoring: ScoringArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ScoringArgs {
    /// Scoring profile: baseline or extended (defaults to CCM_SCORING_PROFILE, then extended)
    #[arg(long, global = true)]
    profile: Option<String>,
    /// Score inputs outside the usual clinical ranges instead of rejecting them
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cardiovascular risk
    Cardiovascular {
        /// Age in years
        #[arg(long, default_value_t = 30.0)]
        age: f64,
        /// Systolic blood pressure (mmHg)
        #[arg(long, default_value_t = 120.0)]
        systolic_bp: f64,
        /// Total cholesterol (mg/dL)
        #[arg(long, default_value_t = 180.0)]
        cholesterol: f64,
        /// Current smoker
        #[arg(long)]
        smoker: bool,
    },
    /// Diabetes risk
    Diabetes {
        #[arg(long, default_value_t = 22.0)]
        bmi: f64,
        /// Age in years
        #[arg(long, default_value_t = 30.0)]
        age: f64,
        /// Family history of diabetes
        #[arg(long)]
        family_history: bool,
        /// Fasting glucose (mg/dL)
        #[arg(long, default_value_t = 90.0)]
        fasting_glucose: f64,
        /// HbA1c (%), extended profile only
        #[arg(long, default_value_t = 5.6)]
        hba1c: f64,
    },
    /// COPD risk
    Copd {
        /// Years of smoking
        #[arg(long, default_value_t = 0.0)]
        smoking_years: f64,
        /// Age in years
        #[arg(long, default_value_t = 30.0)]
        age: f64,
        /// FEV1 (% predicted)
        #[arg(long, default_value_t = 80.0)]
        fev1: f64,
        /// Exacerbations in the last year, extended profile only
        #[arg(long, default_value_t = 0.0)]
        exacerbations: f64,
    },
    /// Asthma risk
    Asthma {
        /// Days per week with symptoms
        #[arg(long, default_value_t = 3.0)]
        symptom_frequency: f64,
        /// Nights per week with symptoms
        #[arg(long, default_value_t = 1.0)]
        nighttime_symptoms: f64,
        /// Days per week using a reliever inhaler
        #[arg(long, default_value_t = 2.0)]
        inhaler_use_days: f64,
        /// FEV1 (% predicted)
        #[arg(long, default_value_t = 80.0)]
        fev1: f64,
        /// Eosinophil count (cells/µL), extended profile only
        #[arg(long, default_value_t = 300.0)]
        eosinophil_count: f64,
    },
    /// Print the unified care plan for a YAML file of submissions
    Plan {
        /// YAML file listing condition submissions in order
        file: PathBuf,
        /// Template style: ccm or mdt
        #[arg(long, default_value = "ccm")]
        style: String,
    },
    /// Ask the assistant about follow-up, monitoring or self-management
    Ask {
        /// YAML file listing condition submissions in order
        file: PathBuf,
        /// Free-text question
        query: String,
    },
}

fn build_scorer(args: &ScoringArgs) -> anyhow::Result<Scorer> {
    let profile = profile_from_env_value(
        args.profile
            .clone()
            .or_else(|| std::env::var("CCM_SCORING_PROFILE").ok()),
    )?;
    let strict_inputs = if args.lenient {
        false
    } else {
        strict_inputs_from_env_value(std::env::var("CCM_STRICT_INPUTS").ok())?
    };
    Ok(Scorer::new(Arc::new(CoreConfig::new(profile, strict_inputs))))
}

fn print_assessment(scorer: &Scorer, inputs: ConditionInputs) -> anyhow::Result<()> {
    let assessment = scorer.assess(&inputs)?;
    println!(
        "{} Risk Level: {} (score {:.2}, {} profile)",
        assessment.condition,
        assessment.tier,
        assessment.score,
        scorer.profile()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ccm_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scorer = build_scorer(&cli.scoring)?;

    match cli.command {
        Some(Commands::Cardiovascular {
            age,
            systolic_bp,
            cholesterol,
            smoker,
        }) => print_assessment(
            &scorer,
            ConditionInputs::Cardiovascular(CardiovascularInputs {
                age,
                systolic_bp,
                smoker,
                cholesterol,
            }),
        )?,
        Some(Commands::Diabetes {
            bmi,
            age,
            family_history,
            fasting_glucose,
            hba1c,
        }) => print_assessment(
            &scorer,
            ConditionInputs::Diabetes(DiabetesInputs {
                bmi,
                age,
                family_history,
                fasting_glucose,
                hba1c: Some(hba1c),
            }),
        )?,
        Some(Commands::Copd {
            smoking_years,
            age,
            fev1,
            exacerbations,
        }) => print_assessment(
            &scorer,
            ConditionInputs::Copd(CopdInputs {
                smoking_years,
                age,
                fev1,
                exacerbations_last_year: Some(exacerbations),
            }),
        )?,
        Some(Commands::Asthma {
            symptom_frequency,
            nighttime_symptoms,
            inhaler_use_days,
            fev1,
            eosinophil_count,
        }) => print_assessment(
            &scorer,
            ConditionInputs::Asthma(AsthmaInputs {
                symptom_frequency,
                nighttime_symptoms,
                inhaler_use_days,
                fev1,
                eosinophil_count: Some(eosinophil_count),
            }),
        )?,
        Some(Commands::Plan { file, style }) => {
            let style = style.parse::<CarePlanStyle>()?;
            let submissions = read_submissions(&file)?;
            let results = score_submissions(&scorer, &submissions)?;
            println!("{}", care_plan(&results, style));
        }
        Some(Commands::Ask { file, query }) => {
            let submissions = read_submissions(&file)?;
            let results = score_submissions(&scorer, &submissions)?;
            println!("{}", assistant_reply(&results, &query).text);
        }
        None => {
            println!("Use 'ccm --help' for commands");
        }
    }

    Ok(())
}
