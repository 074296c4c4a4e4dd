use sclaunch::Config;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    let config = Config::from_env();
    let code = scrun::run(&config, std::env::args_os().skip(1));
    std::process::exit(code);
}
