//! Walks through the three ring kinds and a nested matrix ring.
//!
//! Run with `RUST_LOG=generic_rings=trace` to see pivot decisions.

use anyhow::Result;
use generic_rings::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    // Z/7Z: a rank-deficient matrix.
    let zn = GrCtx::new(Nmod::new(7)?);
    let a = GrMat::from_si(3, 3, &[1, 2, 3, 2, 4, 6, 1, 0, 1], &zn)?;
    println!("A over {}:", zn.describe());
    a.print(&zn).check()?;
    println!("rank(A) = {}\n", a.rank(&zn)?);

    // Q: exact product.
    let qq = GrCtx::new(RationalField::new());
    let b = GrMat::from_si(2, 2, &[1, 2, 3, 4], &qq)?;
    let mut b2 = GrMat::new(2, 2, &qq);
    b2.set(&b, &qq).check()?;
    b2.square_in_place(&qq).check()?;
    println!("B^2 over {}:", qq.describe());
    b2.print(&qq).check()?;

    // Balls: LU either certifies the rank or says it cannot.
    let rr = GrCtx::new(BallRing::new());
    let mut c = GrMat::new(3, 3, &rr);
    c.randtest(&mut StdRng::seed_from_u64(2024), &RandOptions::default(), &rr).check()?;
    let mut lu = GrMat::new(3, 3, &rr);
    let res = lu_classical(&mut lu, &c, LuMode::Full, &rr);
    println!("\nrandom ball matrix: status {}, rank {}", res.status, res.rank);

    // Matrices over matrices.
    let m2 = matrix_ctx(&zn, 2);
    let m2m2 = matrix_ctx(&m2, 2);
    let mut x = m2m2.new_elem();
    m2m2.set_si(x.as_elem_mut(), -1).check()?;
    println!("\n{}", m2m2.describe());
    println!("-1 is minus one: {:?}", m2m2.is_neg_one(x.as_elem()).value());

    Ok(())
}
