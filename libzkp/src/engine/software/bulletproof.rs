//! 64-bit bulletproof range proofs.
//!
//! The proof shows that a commitment `V = gamma*G + v*H` opens to `v < 2^64`. The layout is fixed:
//!
//! ```text
//! A | S | T1 | T2       4 compressed points
//! tau_x | mu | t_hat    3 scalars
//! L[0..6] | R[0..6]     12 compressed points (inner-product rounds)
//! a | b                 2 scalars
//! ```
//!
//! The rewind nonce derives `alpha`, `rho`, `tau1` and `tau2`. The 20-byte message and the value are added to `alpha`,
//! which lets the holder of the rewind nonce recover them (and the blind) from `mu` and `tau_x`. The private nonce
//! derives the blinding vectors `sL` and `sR`.
//!
//! Several parties can build one proof over the sum of their blinds. Each computes `T1`/`T2` shares from its own
//! secret ([`round_one`]), the shares are summed, each party computes its `tau_x` share ([`round_two`]) and any party
//! assembles the proof with the summed `tau_x` (the blindless variant).

use crate::engine::software::args::Arguments;
use crate::engine::software::curve::{
    compressed, hash_to_scalar, nonzero_scalar_from_bytes, point_from_bytes, reduce, scalar_from_bytes,
    scalar_to_bytes,
};
use crate::engine::software::generators::{Generators, RANGE_BITS};
use crate::engine::software::pedersen::{commit, commit_point, decode_commitment};
use crate::engine::{EngineError, Response, RewoundFields};
use k256::{ProjectivePoint, Scalar};
use log::*;
use merlin::Transcript;

const ROUNDS: usize = 6;
const POINT_SIZE: usize = 33;
const SCALAR_SIZE: usize = 32;
const MESSAGE_SIZE: usize = 20;
pub const PROOF_SIZE: usize = 4 * POINT_SIZE + 3 * SCALAR_SIZE + 2 * ROUNDS * POINT_SIZE + 2 * SCALAR_SIZE;

const DERIVATION_DOMAIN: &[u8] = b"libzkp/bulletproof/nonce";

struct RangeProof {
    a: ProjectivePoint,
    s: ProjectivePoint,
    t1: ProjectivePoint,
    t2: ProjectivePoint,
    tau_x: Scalar,
    mu: Scalar,
    t_hat: Scalar,
    l_vec: Vec<ProjectivePoint>,
    r_vec: Vec<ProjectivePoint>,
    a_final: Scalar,
    b_final: Scalar,
}

struct ProofReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl ProofReader<'_> {
    fn take(&mut self, len: usize) -> &[u8] {
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        slice
    }

    fn point(&mut self) -> Result<ProjectivePoint, EngineError> {
        point_from_bytes(self.take(POINT_SIZE), "proof point")
    }

    fn scalar(&mut self) -> Result<Scalar, EngineError> {
        scalar_from_bytes(self.take(SCALAR_SIZE), "proof scalar")
    }

    fn points(&mut self, count: usize) -> Result<Vec<ProjectivePoint>, EngineError> {
        (0..count).map(|_| self.point()).collect()
    }
}

impl RangeProof {
    fn parse(bytes: &[u8]) -> Result<Self, EngineError> {
        if bytes.len() != PROOF_SIZE {
            return Err(EngineError::malformed(format!("proof must be {PROOF_SIZE} bytes, but got {}", bytes.len())));
        }
        let mut reader = ProofReader { bytes, offset: 0 };
        Ok(RangeProof {
            a: reader.point()?,
            s: reader.point()?,
            t1: reader.point()?,
            t2: reader.point()?,
            tau_x: reader.scalar()?,
            mu: reader.scalar()?,
            t_hat: reader.scalar()?,
            l_vec: reader.points(ROUNDS)?,
            r_vec: reader.points(ROUNDS)?,
            a_final: reader.scalar()?,
            b_final: reader.scalar()?,
        })
    }

    fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        let mut out = Vec::with_capacity(PROOF_SIZE);
        for point in [&self.a, &self.s, &self.t1, &self.t2] {
            out.extend_from_slice(&compressed(point, "proof point")?);
        }
        for scalar in [&self.tau_x, &self.mu, &self.t_hat] {
            out.extend_from_slice(&scalar_to_bytes(scalar));
        }
        for point in self.l_vec.iter().chain(&self.r_vec) {
            out.extend_from_slice(&compressed(point, "inner product point")?);
        }
        out.extend_from_slice(&scalar_to_bytes(&self.a_final));
        out.extend_from_slice(&scalar_to_bytes(&self.b_final));
        Ok(out)
    }
}

/// Fiat-Shamir transcript, bound to the commitment and the extra commitment.
struct ProofTranscript(Transcript);

impl ProofTranscript {
    fn new(commitment: &[u8], extra: &[u8]) -> Self {
        let mut transcript = Transcript::new(b"libzkp range proof");
        transcript.append_message(b"n", &(RANGE_BITS as u64).to_le_bytes());
        transcript.append_message(b"V", commitment);
        transcript.append_message(b"extra", extra);
        ProofTranscript(transcript)
    }

    fn append_point(&mut self, label: &'static [u8], point: &ProjectivePoint) -> Result<(), EngineError> {
        self.0.append_message(label, &compressed(point, "transcript point")?);
        Ok(())
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.0.append_message(label, &scalar_to_bytes(scalar));
    }

    fn challenge(&mut self, label: &'static [u8]) -> Result<Scalar, EngineError> {
        let mut buf = [0u8; 32];
        self.0.challenge_bytes(label, &mut buf);
        let challenge = reduce(&buf);
        if bool::from(challenge.is_zero()) {
            return Err(EngineError::failure("transcript produced a zero challenge"));
        }
        Ok(challenge)
    }
}

fn derive(seed: &[u8; 32], label: &[u8], index: u32) -> Scalar {
    hash_to_scalar(&[DERIVATION_DOMAIN, label, seed, &index.to_be_bytes()])
}

fn tau_secrets(seed: &[u8; 32]) -> (Scalar, Scalar) {
    (derive(seed, b"tau1", 0), derive(seed, b"tau2", 0))
}

fn blinding_vectors(private_nonce: &[u8; 32]) -> (Vec<Scalar>, Vec<Scalar>) {
    let s_l = (0..RANGE_BITS as u32).map(|i| derive(private_nonce, b"sL", i)).collect();
    let s_r = (0..RANGE_BITS as u32).map(|i| derive(private_nonce, b"sR", i)).collect();
    (s_l, s_r)
}

/// `0^4 || message || value` as a big-endian scalar. The zero prefix keeps it below the group order.
fn embedded_scalar(value: u64, message: &[u8; MESSAGE_SIZE]) -> Result<Scalar, EngineError> {
    let mut bytes = [0u8; 32];
    bytes[4..24].copy_from_slice(message);
    bytes[24..].copy_from_slice(&value.to_be_bytes());
    scalar_from_bytes(&bytes, "embedded data")
}

fn invert(scalar: &Scalar) -> Result<Scalar, EngineError> {
    Option::<Scalar>::from(scalar.invert()).ok_or_else(|| EngineError::failure("cannot invert zero"))
}

fn powers(base: &Scalar, count: usize) -> Vec<Scalar> {
    let mut out = Vec::with_capacity(count);
    let mut current = Scalar::ONE;
    for _ in 0..count {
        out.push(current);
        current *= base;
    }
    out
}

fn powers_of_two() -> Vec<Scalar> {
    (0..RANGE_BITS).map(|i| Scalar::from(1u64 << i)).collect()
}

fn inner_product(a: &[Scalar], b: &[Scalar]) -> Scalar {
    a.iter().zip(b).fold(Scalar::ZERO, |acc, (x, y)| acc + x * y)
}

fn multi_mul(scalars: &[Scalar], points: &[ProjectivePoint]) -> ProjectivePoint {
    scalars.iter().zip(points).fold(ProjectivePoint::IDENTITY, |acc, (s, p)| acc + p * s)
}

/// Everything the prover knows after committing to the bits and the blinding vectors.
struct BitCommitment {
    transcript: ProofTranscript,
    alpha: Scalar,
    rho: Scalar,
    a: ProjectivePoint,
    s: ProjectivePoint,
    y: Scalar,
    z: Scalar,
    l0: Vec<Scalar>,
    l1: Vec<Scalar>,
    r0: Vec<Scalar>,
    r1: Vec<Scalar>,
    t1: Scalar,
    t2: Scalar,
}

/// The inputs every party to a proof agrees on.
struct ProofStatement<'a> {
    commitment: &'a [u8],
    value: u64,
    extra: &'a [u8],
    message: &'a [u8; MESSAGE_SIZE],
    nonce: &'a [u8; 32],
    private_nonce: &'a [u8; 32],
}

fn commit_bits(generators: &Generators, statement: &ProofStatement) -> Result<BitCommitment, EngineError> {
    let mut transcript = ProofTranscript::new(statement.commitment, statement.extra);
    let a_l: Vec<Scalar> = (0..RANGE_BITS).map(|i| Scalar::from((statement.value >> i) & 1)).collect();
    let a_r: Vec<Scalar> = a_l.iter().map(|bit| bit - &Scalar::ONE).collect();
    let alpha = derive(statement.nonce, b"alpha", 0) + embedded_scalar(statement.value, statement.message)?;
    let rho = derive(statement.nonce, b"rho", 0);
    let (s_l, s_r) = blinding_vectors(statement.private_nonce);

    let a = generators.g * alpha + multi_mul(&a_l, &generators.g_vec) + multi_mul(&a_r, &generators.h_vec);
    let s = generators.g * rho + multi_mul(&s_l, &generators.g_vec) + multi_mul(&s_r, &generators.h_vec);
    transcript.append_point(b"A", &a)?;
    transcript.append_point(b"S", &s)?;
    let y = transcript.challenge(b"y")?;
    let z = transcript.challenge(b"z")?;

    let z2 = z * z;
    let y_pow = powers(&y, RANGE_BITS);
    let two_pow = powers_of_two();
    let l0: Vec<Scalar> = a_l.iter().map(|bit| bit - &z).collect();
    let l1 = s_l;
    let r0: Vec<Scalar> = (0..RANGE_BITS).map(|i| y_pow[i] * (a_r[i] + z) + z2 * two_pow[i]).collect();
    let r1: Vec<Scalar> = (0..RANGE_BITS).map(|i| y_pow[i] * s_r[i]).collect();
    let t1 = inner_product(&l0, &r1) + inner_product(&l1, &r0);
    let t2 = inner_product(&l1, &r1);
    Ok(BitCommitment { transcript, alpha, rho, a, s, y, z, l0, l1, r0, r1, t1, t2 })
}

/// How `tau_x` and the `T1`/`T2` blinding terms are produced.
enum TauSource {
    /// A single prover who knows the blind derives `tau1`/`tau2` from the rewind nonce.
    Blind(Scalar),
    /// Summed multi-party values.
    Shared { tau_x: Scalar, t_one: ProjectivePoint, t_two: ProjectivePoint },
}

fn prove(generators: &Generators, statement: &ProofStatement, tau: TauSource) -> Result<RangeProof, EngineError> {
    let BitCommitment { mut transcript, alpha, rho, a, s, y, z, l0, l1, r0, r1, t1, t2 } =
        commit_bits(generators, statement)?;
    let (tau1, tau2) = tau_secrets(statement.nonce);
    let (t1_point, t2_point) = match &tau {
        TauSource::Blind(_) => (generators.h * t1 + generators.g * tau1, generators.h * t2 + generators.g * tau2),
        TauSource::Shared { t_one, t_two, .. } => (generators.h * t1 + t_one, generators.h * t2 + t_two),
    };
    transcript.append_point(b"T1", &t1_point)?;
    transcript.append_point(b"T2", &t2_point)?;
    let x = transcript.challenge(b"x")?;

    let tau_x = match tau {
        TauSource::Blind(gamma) => tau2 * x * x + tau1 * x + z * z * gamma,
        TauSource::Shared { tau_x, .. } => tau_x,
    };
    let mu = alpha + rho * x;
    let l: Vec<Scalar> = l0.iter().zip(&l1).map(|(c, d)| c + &(d * &x)).collect();
    let r: Vec<Scalar> = r0.iter().zip(&r1).map(|(c, d)| c + &(d * &x)).collect();
    let t_hat = inner_product(&l, &r);
    transcript.append_scalar(b"tau_x", &tau_x);
    transcript.append_scalar(b"mu", &mu);
    transcript.append_scalar(b"t_hat", &t_hat);
    let w = transcript.challenge(b"w")?;
    let q = generators.h * w;

    let y_inv_pow = powers(&invert(&y)?, RANGE_BITS);
    let h_prime: Vec<ProjectivePoint> = generators.h_vec.iter().zip(&y_inv_pow).map(|(h, s)| h * s).collect();
    let (l_vec, r_vec, a_final, b_final) =
        prove_inner_product(&mut transcript, generators.g_vec.clone(), h_prime, &q, l, r)?;
    Ok(RangeProof { a, s, t1: t1_point, t2: t2_point, tau_x, mu, t_hat, l_vec, r_vec, a_final, b_final })
}

type InnerProductProof = (Vec<ProjectivePoint>, Vec<ProjectivePoint>, Scalar, Scalar);

fn prove_inner_product(
    transcript: &mut ProofTranscript,
    mut g: Vec<ProjectivePoint>,
    mut h: Vec<ProjectivePoint>,
    q: &ProjectivePoint,
    mut a: Vec<Scalar>,
    mut b: Vec<Scalar>,
) -> Result<InnerProductProof, EngineError> {
    let mut l_vec = Vec::with_capacity(ROUNDS);
    let mut r_vec = Vec::with_capacity(ROUNDS);
    while a.len() > 1 {
        let half = a.len() / 2;
        let (a_lo, a_hi) = a.split_at(half);
        let (b_lo, b_hi) = b.split_at(half);
        let (g_lo, g_hi) = g.split_at(half);
        let (h_lo, h_hi) = h.split_at(half);
        let c_l = inner_product(a_lo, b_hi);
        let c_r = inner_product(a_hi, b_lo);
        let l = multi_mul(a_lo, g_hi) + multi_mul(b_hi, h_lo) + q * &c_l;
        let r = multi_mul(a_hi, g_lo) + multi_mul(b_lo, h_hi) + q * &c_r;
        transcript.append_point(b"L", &l)?;
        transcript.append_point(b"R", &r)?;
        let u = transcript.challenge(b"u")?;
        let u_inv = invert(&u)?;

        let next_a = (0..half).map(|i| a_lo[i] * u + a_hi[i] * u_inv).collect();
        let next_b = (0..half).map(|i| b_lo[i] * u_inv + b_hi[i] * u).collect();
        let next_g = (0..half).map(|i| g_lo[i] * u_inv + g_hi[i] * u).collect();
        let next_h = (0..half).map(|i| h_lo[i] * u + h_hi[i] * u_inv).collect();
        a = next_a;
        b = next_b;
        g = next_g;
        h = next_h;
        l_vec.push(l);
        r_vec.push(r);
    }
    Ok((l_vec, r_vec, a[0], b[0]))
}

/// `(z - z^2) * sum(y^i) - z^3 * sum(2^i)`
fn delta(y_pow: &[Scalar], z: &Scalar) -> Scalar {
    let z2 = z * z;
    let z3 = z2 * z;
    let sum_y = y_pow.iter().fold(Scalar::ZERO, |acc, p| acc + p);
    let sum_two = Scalar::from(u64::MAX);
    (z - &z2) * sum_y - z3 * sum_two
}

fn check_proof(
    generators: &Generators,
    proof: &RangeProof,
    commitment: &[u8],
    commitment_point: &ProjectivePoint,
    extra: &[u8],
) -> Result<bool, EngineError> {
    let mut transcript = ProofTranscript::new(commitment, extra);
    transcript.append_point(b"A", &proof.a)?;
    transcript.append_point(b"S", &proof.s)?;
    let y = transcript.challenge(b"y")?;
    let z = transcript.challenge(b"z")?;
    transcript.append_point(b"T1", &proof.t1)?;
    transcript.append_point(b"T2", &proof.t2)?;
    let x = transcript.challenge(b"x")?;
    transcript.append_scalar(b"tau_x", &proof.tau_x);
    transcript.append_scalar(b"mu", &proof.mu);
    transcript.append_scalar(b"t_hat", &proof.t_hat);
    let w = transcript.challenge(b"w")?;
    let q = generators.h * w;

    let z2 = z * z;
    let y_pow = powers(&y, RANGE_BITS);
    let lhs = generators.h * proof.t_hat + generators.g * proof.tau_x;
    let rhs = commitment_point * &z2 + generators.h * delta(&y_pow, &z) + proof.t1 * x + proof.t2 * (x * x);
    if lhs != rhs {
        debug!("Range proof polynomial check failed");
        return Ok(false);
    }

    let y_inv_pow = powers(&invert(&y)?, RANGE_BITS);
    let two_pow = powers_of_two();
    let mut p = proof.a + proof.s * x - generators.g * proof.mu + q * proof.t_hat;
    for i in 0..RANGE_BITS {
        p -= generators.g_vec[i] * z;
        p += generators.h_vec[i] * (z + z2 * two_pow[i] * y_inv_pow[i]);
    }
    let mut g = generators.g_vec.clone();
    let mut h: Vec<ProjectivePoint> = generators.h_vec.iter().zip(&y_inv_pow).map(|(h, s)| h * s).collect();
    for (l, r) in proof.l_vec.iter().zip(&proof.r_vec) {
        transcript.append_point(b"L", l)?;
        transcript.append_point(b"R", r)?;
        let u = transcript.challenge(b"u")?;
        let u_inv = invert(&u)?;
        p = l * &(u * u) + p + r * &(u_inv * u_inv);
        let half = g.len() / 2;
        g = (0..half).map(|i| g[i] * u_inv + g[half + i] * u).collect();
        h = (0..half).map(|i| h[i] * u + h[half + i] * u_inv).collect();
    }
    let expected = g[0] * proof.a_final + h[0] * proof.b_final + q * (proof.a_final * proof.b_final);
    let verified = p == expected;
    if !verified {
        debug!("Range proof inner product check failed");
    }
    Ok(verified)
}

struct Rewound {
    value: u64,
    blind: Scalar,
    message: [u8; MESSAGE_SIZE],
}

fn rewind_proof(
    generators: &Generators,
    proof: &RangeProof,
    commitment: &[u8],
    commitment_point: &ProjectivePoint,
    extra: &[u8],
    nonce: &[u8; 32],
) -> Result<Rewound, EngineError> {
    let mut transcript = ProofTranscript::new(commitment, extra);
    transcript.append_point(b"A", &proof.a)?;
    transcript.append_point(b"S", &proof.s)?;
    let _y = transcript.challenge(b"y")?;
    let z = transcript.challenge(b"z")?;
    transcript.append_point(b"T1", &proof.t1)?;
    transcript.append_point(b"T2", &proof.t2)?;
    let x = transcript.challenge(b"x")?;

    let alpha = derive(nonce, b"alpha", 0);
    let rho = derive(nonce, b"rho", 0);
    let embedded = scalar_to_bytes(&(proof.mu - rho * x - alpha));
    if embedded[..4] != [0u8; 4] {
        return Err(EngineError::failure("proof was not created with this nonce"));
    }
    let mut message = [0u8; MESSAGE_SIZE];
    message.copy_from_slice(&embedded[4..24]);
    let mut value_bytes = [0u8; 8];
    value_bytes.copy_from_slice(&embedded[24..]);
    let value = u64::from_be_bytes(value_bytes);

    let (tau1, tau2) = tau_secrets(nonce);
    let blind = (proof.tau_x - tau1 * x - tau2 * x * x) * invert(&(z * z))?;
    if commit_point(generators, &blind, value) != *commitment_point {
        return Err(EngineError::failure("rewound value and blind do not open the commitment"));
    }
    Ok(Rewound { value, blind, message })
}

fn nonce_argument(args: &mut Arguments, name: &str) -> Result<[u8; 32], EngineError> {
    let nonce = args.fixed::<32>(name)?;
    nonzero_scalar_from_bytes(&nonce, name)?;
    Ok(nonce)
}

fn message_argument(args: &mut Arguments) -> Result<[u8; MESSAGE_SIZE], EngineError> {
    args.fixed::<MESSAGE_SIZE>("message")
}

pub fn create(generators: &Generators, args: &mut Arguments) -> Result<Response, EngineError> {
    let blind = scalar_from_bytes(&args.bytes("blind")?, "blind")?;
    let value = args.value("value")?;
    let nonce = nonce_argument(args, "nonce")?;
    let private_nonce = nonce_argument(args, "private nonce")?;
    let extra = args.bytes("extra commitment")?;
    let message = message_argument(args)?;

    let commitment = commit(generators, &blind, value)?;
    let statement = ProofStatement {
        commitment: &commitment,
        value,
        extra: &extra,
        message: &message,
        nonce: &nonce,
        private_nonce: &private_nonce,
    };
    let proof = prove(generators, &statement, TauSource::Blind(blind))?;
    debug!("Created range proof");
    Ok(Response::Text(hex::encode(proof.to_bytes()?)))
}

pub fn create_blindless(generators: &Generators, args: &mut Arguments) -> Result<Response, EngineError> {
    let tau_x = scalar_from_bytes(&args.bytes("tau_x")?, "tau_x")?;
    let t_one = point_from_bytes(&args.bytes("T1 share total")?, "T1 share total")?;
    let t_two = point_from_bytes(&args.bytes("T2 share total")?, "T2 share total")?;
    let commitment = args.bytes("commitment")?;
    decode_commitment(&commitment)?;
    let value = args.value("value")?;
    let nonce = nonce_argument(args, "nonce")?;
    let extra = args.bytes("extra commitment")?;
    let message = message_argument(args)?;

    let statement = ProofStatement {
        commitment: &commitment,
        value,
        extra: &extra,
        message: &message,
        nonce: &nonce,
        private_nonce: &nonce,
    };
    let proof = prove(generators, &statement, TauSource::Shared { tau_x, t_one, t_two })?;
    debug!("Created multi-party range proof");
    Ok(Response::Text(hex::encode(proof.to_bytes()?)))
}

pub fn verify(generators: &Generators, args: &mut Arguments) -> Result<Response, EngineError> {
    let proof = RangeProof::parse(&args.bytes("proof")?)?;
    let commitment = args.bytes("commitment")?;
    let commitment_point = decode_commitment(&commitment)?;
    let extra = args.bytes("extra commitment")?;
    let verified = match check_proof(generators, &proof, &commitment, &commitment_point, &extra) {
        Ok(verified) => verified,
        Err(EngineError::CryptographicFailure(reason)) => {
            debug!("Range proof rejected: {reason}");
            false
        }
        Err(e) => return Err(e),
    };
    Ok(Response::Bool(verified))
}

pub fn rewind(generators: &Generators, args: &mut Arguments) -> Result<Response, EngineError> {
    let proof = RangeProof::parse(&args.bytes("proof")?)?;
    let commitment = args.bytes("commitment")?;
    let commitment_point = decode_commitment(&commitment)?;
    let nonce = nonce_argument(args, "nonce")?;
    let extra = args.trailing_bytes_or_empty("extra commitment")?;
    let rewound = rewind_proof(generators, &proof, &commitment, &commitment_point, &extra, &nonce)?;
    Ok(Response::Rewound(RewoundFields {
        value: rewound.value.to_string(),
        blind: hex::encode(scalar_to_bytes(&rewound.blind)),
        message: hex::encode(rewound.message),
    }))
}

/// The public statement shared by all parties to a multi-party proof, in boundary encoding.
#[derive(Clone)]
pub struct SharedProofInputs {
    pub commitment: Vec<u8>,
    pub value: u64,
    pub nonce: [u8; 32],
    pub extra: Vec<u8>,
    pub message: [u8; MESSAGE_SIZE],
    pub t_one_total: Vec<u8>,
    pub t_two_total: Vec<u8>,
}

/// A party's `T1` and `T2` shares, `tau1*G` and `tau2*G`, both compressed.
pub fn round_one(party_nonce: &[u8; 32]) -> Result<(Vec<u8>, Vec<u8>), EngineError> {
    nonzero_scalar_from_bytes(party_nonce, "party nonce")?;
    let (tau1, tau2) = tau_secrets(party_nonce);
    let t_one = compressed(&(ProjectivePoint::GENERATOR * tau1), "T1 share")?;
    let t_two = compressed(&(ProjectivePoint::GENERATOR * tau2), "T2 share")?;
    Ok((t_one, t_two))
}

/// A party's `tau_x` share: `tau1*x + tau2*x^2 + z^2*blind`.
pub fn round_two(
    generators: &Generators,
    party_nonce: &[u8; 32],
    party_blind: &[u8],
    shared: &SharedProofInputs,
) -> Result<Vec<u8>, EngineError> {
    nonzero_scalar_from_bytes(party_nonce, "party nonce")?;
    let blind = scalar_from_bytes(party_blind, "party blind")?;
    decode_commitment(&shared.commitment)?;
    nonzero_scalar_from_bytes(&shared.nonce, "nonce")?;
    let t_one = point_from_bytes(&shared.t_one_total, "T1 share total")?;
    let t_two = point_from_bytes(&shared.t_two_total, "T2 share total")?;
    let statement = ProofStatement {
        commitment: &shared.commitment,
        value: shared.value,
        extra: &shared.extra,
        message: &shared.message,
        nonce: &shared.nonce,
        private_nonce: &shared.nonce,
    };
    let mut bits = commit_bits(generators, &statement)?;
    bits.transcript.append_point(b"T1", &(generators.h * bits.t1 + t_one))?;
    bits.transcript.append_point(b"T2", &(generators.h * bits.t2 + t_two))?;
    let x = bits.transcript.challenge(b"x")?;
    let (tau1, tau2) = tau_secrets(party_nonce);
    let share = tau1 * x + tau2 * x * x + bits.z * bits.z * blind;
    trace!("Computed a tau_x share");
    Ok(scalar_to_bytes(&share))
}
