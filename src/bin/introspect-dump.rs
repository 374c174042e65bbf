use clap::Parser;
use introspect_cache::{
    conversion::DefaultConversionHandler,
    log::LogSink,
    maps::{ClassFieldMapBuilder, ClassMapBuilder},
    sync::Arc,
    types::{
        members::{Member, MemberDescription},
        TypeDefinition, TypeDescription, TypeLoader,
    },
    CacheConfig, IntrospectionError, IntrospectorCache,
};
use std::{fs, path::PathBuf, process::ExitCode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Dump the public members of type definitions through the introspector cache"
)]
struct Args {
    /// JSON file containing an array of type definitions
    definitions: PathBuf,
    /// The full name of a single type to dump (e.g. shop.Order)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    type_name: Option<String>,
    /// Reload the definitions this many times, dumping again after each reload
    #[arg(short, long, default_value_t = 0)]
    reloads: usize,
    /// Print cache statistics as JSON when done
    #[arg(long)]
    stats: bool,
}

struct StderrLog;

impl LogSink for StderrLog {
    fn debug(&self, message: &str) {
        eprintln!("[introspection] {message}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let source = match fs::read_to_string(&args.definitions) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.definitions.display(), e);
            return ExitCode::from(1);
        }
    };
    let definitions: Vec<TypeDefinition> = match serde_json::from_str(&source) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing {}: {}", args.definitions.display(), e);
            return ExitCode::from(1);
        }
    };

    let cache: IntrospectorCache = IntrospectorCache::with_config(
        Arc::new(StderrLog),
        Arc::new(DefaultConversionHandler),
        ClassMapBuilder,
        ClassFieldMapBuilder,
        CacheConfig::from_env(),
    );

    let mut loader = TypeLoader::new(definitions);
    for generation in 0..=args.reloads {
        if generation > 0 {
            loader = loader.reload();
            eprintln!("Reloaded definitions into {:?}", loader.context());
        }

        let types = match &args.type_name {
            None => loader.types(),
            Some(name) => match loader.load(name) {
                Some(t) => vec![t],
                None => {
                    eprintln!("Type '{}' not found", name);
                    println!("\nAvailable types:");
                    for t in loader.types() {
                        println!("  {}", t.type_name());
                    }
                    return ExitCode::from(1);
                }
            },
        };

        for ty in &types {
            if let Err(e) = dump_type(&cache, ty) {
                eprintln!("Error introspecting {}: {}", ty.type_name(), e);
            }
        }
    }

    if args.stats {
        match serde_json::to_string_pretty(&cache.stats()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing statistics: {}", e);
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}

fn dump_type(cache: &IntrospectorCache, ty: &TypeDescription) -> Result<(), IntrospectionError> {
    let methods = match cache.lookup_methods(ty)? {
        Some(m) => m,
        None => cache.insert(ty)?,
    };
    let Some(fields) = cache.lookup_fields(ty)? else {
        return Ok(());
    };

    let mut members: Vec<MemberDescription> = vec![];
    for name in fields.field_names() {
        if let Some(f) = fields.find_field(name) {
            members.push(f.clone().into());
        }
    }
    for name in methods.method_names() {
        members.extend(methods.methods(name).iter().cloned().map(Into::into));
    }

    println!("\n{:?}", ty);
    for member in &members {
        let kind = match member {
            MemberDescription::MethodDescription(_) => "method",
            MemberDescription::FieldDescription(_) => "field",
        };
        println!("  - {:<6} {}", kind, member.signature());
    }
    Ok(())
}
