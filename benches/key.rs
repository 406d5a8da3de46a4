#![feature(test)]

extern crate test;

use hex_literal::hex;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use test::Bencher;
use textbook_rsa::{codec::message_to_int, prime, BigUint, RsaPrivateKey};

const MESSAGE: &[u8] = b"O VALTER O BYTHQIM";

fn get_key() -> RsaPrivateKey {
    // two 256-bit primes
    let p = hex!("de7d6b377936d536243d35702c1eea1f265974a7cc966f46c6aa7d550101b811");
    let q = hex!("cf28f65e408fc146794ec926bc9e28eabee8062610e8ad0186a74a63a8c7d9e1");

    RsaPrivateKey::from_primes(BigUint::from_bytes_be(&p), BigUint::from_bytes_be(&q)).unwrap()
}

#[bench]
fn bench_gen_key_512_bit_primes(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_gen_key_1024_bit_primes(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let key = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        test::black_box(key);
    });
}

#[bench]
fn bench_gen_prime_1024(b: &mut Bencher) {
    let mut rng = ChaCha8Rng::from_seed([42; 32]);

    b.iter(|| {
        let p = prime::generate_prime(&mut rng, 1024, prime::DEFAULT_PRIMALITY_ROUNDS).unwrap();
        test::black_box(p);
    });
}

#[bench]
fn bench_rsa_512_encrypt(b: &mut Bencher) {
    let public_key = get_key().to_public_key();
    let m = message_to_int(MESSAGE);

    b.iter(|| {
        let res = public_key.encrypt_int(&m).unwrap();
        test::black_box(res);
    });
}

#[bench]
fn bench_rsa_512_decrypt(b: &mut Bencher) {
    let priv_key = get_key();
    let c = priv_key
        .to_public_key()
        .encrypt_int(&message_to_int(MESSAGE))
        .unwrap();

    b.iter(|| {
        let res = priv_key.decrypt_int(&c).unwrap();
        test::black_box(res);
    });
}
