use std::thread;
use std::time::{Duration, Instant};

use rand_core::OsRng;
use rand_core::RngCore;

use wirebase::crypto::{secure_eq, Hmac, Sha1, Sha256};
use wirebase::crypto_impl::CrateMd5;
use wirebase::{base64, BigEndianReader, BigEndianWriter, HashEngine};

const CHUNK_SIZE: usize = 16 * 1024;

fn report(name: &str, bytes: usize, elapsed: Duration) {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    println!("{:>12}: {:8.1} MiB/s", name, mb / elapsed.as_secs_f64());
}

fn bench_hash<H: HashEngine>(name: &str, data: &[u8], total: usize) -> H::Digest {
    let start = Instant::now();
    let mut h = H::new();
    let mut done = 0;
    while done < total {
        h.update(data);
        done += data.len();
    }
    let digest = h.finish();
    report(name, done, start.elapsed());
    digest
}

fn bench_hmac<H: HashEngine>(name: &str, key: &[u8], data: &[u8], total: usize) -> H::Digest {
    let start = Instant::now();
    let mut hm = Hmac::<H>::new(key);
    let mut done = 0;
    while done < total {
        hm.update(data);
        done += data.len();
    }
    let mac = hm.finish();
    report(name, done, start.elapsed());
    mac
}

fn bench_cursor(total: usize) {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let start = Instant::now();
    let mut done = 0;
    let mut sum = 0u64;
    while done < total {
        let mut w = BigEndianWriter::new(&mut buf);
        let mut i = 0u64;
        while w.write_u64(i).is_ok() {
            i += 1;
        }
        let mut r = BigEndianReader::new(&buf);
        while let Ok(v) = r.read_u64() {
            sum = sum.wrapping_add(v);
        }
        done += 2 * CHUNK_SIZE;
    }
    report("cursor u64", done, start.elapsed());
    assert_ne!(sum, 0);
}

fn bench_base64(data: &[u8], total: usize) {
    let start = Instant::now();
    let mut done = 0;
    while done < total {
        let text = base64::encode(data);
        let back = base64::decode(&text).unwrap();
        assert_eq!(back.len(), data.len());
        done += data.len();
    }
    report("base64", done, start.elapsed());
}

fn core(total: usize) {
    let mut data = vec![0u8; CHUNK_SIZE];
    OsRng.fill_bytes(&mut data);
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);

    bench_hash::<Sha1>("sha1", &data, total);
    let single = bench_hash::<Sha256>("sha256", &data, total);
    bench_hash::<CrateMd5>("md5", &data, total);
    bench_hmac::<Sha1>("hmac-sha1", &key, &data, total);
    bench_hmac::<Sha256>("hmac-sha256", &key, &data, total);
    bench_cursor(total);
    bench_base64(&data, total / 4);

    // Independent engines on independent threads must agree with the single threaded run.
    let digests: Vec<[u8; 32]> = thread::scope(|ts| {
        let workers: Vec<_> = (0..4).map(|_| ts.spawn(|| bench_hash::<Sha256>("sha256 (mt)", &data, total))).collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });
    for d in digests.iter() {
        assert!(secure_eq(d, &single));
    }
}

fn main() {
    core(256 * 1024 * 1024)
}

#[test]
fn test_main() {
    core(4 * 1024 * 1024)
}
