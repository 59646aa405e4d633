use std::sync::Arc;
use std::thread;
use std::time::Instant;
use token_queue::{ActorConfig, ActorQueue, LockQueue, Token, TokenQueue};
use tracing_subscriber::{fmt, EnvFilter};

// Configuration
const PRODUCERS: usize = 4; // Number of producer threads
const CONSUMERS: usize = 2; // Number of consumer threads
const N: usize = 100_000; // Each producer enqueues this many tokens
const BATCH: usize = 4; // Consumers dequeue this many tokens at a time

fn run<Q: TokenQueue + 'static>(name: &str, queue: Q) -> Q {
    println!("{name}");
    println!("{}", "-".repeat(name.len()));

    let queue = Arc::new(queue);
    let start_time = Instant::now();

    let mut producer_threads = Vec::with_capacity(PRODUCERS);
    for p in 0..PRODUCERS {
        let q = queue.clone();
        producer_threads.push(thread::spawn(move || {
            for i in 0..N {
                q.enqueue(Token::from(format!("p{p}-{i}")));
            }
        }));
    }

    // Consumers stop once their share has been taken
    let share = PRODUCERS * N / CONSUMERS / BATCH;
    let mut consumer_threads = Vec::with_capacity(CONSUMERS);
    for _ in 0..CONSUMERS {
        let q = queue.clone();
        consumer_threads.push(thread::spawn(move || {
            let mut batches = 0;
            let mut misses = 0u64;
            while batches < share {
                match q.dequeue(BATCH) {
                    Some(_) => batches += 1,
                    None => {
                        misses += 1;
                        thread::yield_now();
                    }
                }
            }
            misses
        }));
    }

    for handle in producer_threads {
        handle.join().unwrap();
    }
    let misses: u64 = consumer_threads
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .sum();

    println!("Execution time: {:?}", start_time.elapsed());
    println!("Tokens left: {}", queue.len());
    println!("Dequeues that found too few tokens: {misses}\n");

    match Arc::try_unwrap(queue) {
        Ok(queue) => queue,
        Err(_) => unreachable!("all worker threads have been joined"),
    }
}

fn main() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    println!("token_queue example");
    println!("-------------------\n");
    println!("Starting {PRODUCERS} producers and {CONSUMERS} consumers");
    println!("Each producer will enqueue {N} tokens\n");

    let lock = run("LockQueue", LockQueue::new());
    assert!(lock.is_empty());

    let config = ActorConfig::new().thread_name("demo-actor");
    let actor = match ActorQueue::with_config(Vec::new(), config) {
        Ok(actor) => actor,
        Err(err) => {
            eprintln!("ERROR: {err}");
            return;
        }
    };
    let actor = run("ActorQueue", actor);
    match actor.shutdown() {
        Ok(left) => println!("Actor shut down with {} tokens left", left.len()),
        Err(err) => eprintln!("ERROR: {err}"),
    }
}
