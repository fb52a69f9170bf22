use std::{path::PathBuf, sync::Arc};

use clap::Parser as ClapParser;
use hyaccess::{
    access,
    config::EmitterConfig,
    emit::{TraceEmitter, set_global_emitter},
    hint::*,
    ptr::AnnotatedPtr,
};
use hyprop::properties;

#[derive(ClapParser)]
pub struct Arguments {
    /// Path to an emitter configuration (TOML). Defaults to the user configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the decoded hint fields next to every access
    #[arg(long)]
    decode: bool,
}

/// Loads and stores over a small buffer, with and without hints.
fn foo(data: &mut [f64; 20]) -> f64 {
    let base = data.as_mut_ptr();

    // SAFETY: every offset below stays within `data`.
    unsafe {
        let d0 = access::load_default(base.cast_const());
        let d1 = access::load(
            base.add(1).cast_const(),
            properties![temporality_hint::<Nontemporal>()],
        );
        let d2 = access::load(
            base.add(2).cast_const(),
            properties![temporality_hint::<Temporal>()],
        );

        let dp = AnnotatedPtr::new(base, properties![temporality_hint::<Nontemporal>()]);
        let d3 = dp.reference().load();
        let d4 = (dp + 4).read();
        dp.write(d1);

        let cached = AnnotatedPtr::new(
            base.add(8),
            properties![l1_cache_hint::<Cached>(), l2_cache_hint::<Uncached>()],
        );
        cached.write(d2 + d4);

        d0 + d1 + d2 + d3 + d4
    }
}

fn main() {
    let args = Arguments::parse();

    let loaded = match &args.config {
        Some(path) => EmitterConfig::load_from_toml(path),
        None => EmitterConfig::load_or_default(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    config.decode_fields |= args.decode;

    set_global_emitter(Arc::new(TraceEmitter::stdout(config)));

    let mut data = [0.0f64; 20];
    for (i, slot) in data.iter_mut().enumerate() {
        *slot = i as f64;
    }

    let sum = foo(&mut data);
    println!("sum = {}, data[0] = {}, data[8] = {}", sum, data[0], data[8]);
}
