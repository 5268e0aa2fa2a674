use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Instruction-set levels that select a backend in this crate
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    // every cpuinfo flag that has to be present for the level to be usable
    requires: &'static [&'static str],
    cfg_flag: &'static str,
    // present on the build host
    detected: bool,
    // enabled for code generation (`-C target-feature` / `-C target-cpu`)
    enabled: bool,
    nightly_only: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "avx512" => 0,
            "avx2" => 1,
            "sse4_1" => 2,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse4_1",
                requires: &["sse4_1"],
                cfg_flag: "sse",
                detected: false,
                enabled: false,
                nightly_only: false,
            },
            CpuFeature {
                name: "avx512",
                // 256-bit forms of the AVX-512 integer instructions need VL on top of BW/DQ
                requires: &["avx512f", "avx512bw", "avx512dq", "avx512vl"],
                cfg_flag: "avx512",
                detected: false,
                enabled: false,
                nightly_only: true,
            },
            CpuFeature {
                name: "avx2",
                requires: &["avx2"],
                cfg_flag: "avx2",
                detected: false,
                enabled: false,
                nightly_only: false,
            },
            CpuFeature {
                name: "neon",
                requires: &["neon"],
                cfg_flag: "neon",
                detected: false,
                enabled: false,
                nightly_only: false,
            },
        ]
    }

    // AVX-512 intrinsics are only enabled on nightly builds
    fn available(nightly_build: bool) -> Vec<CpuFeature> {
        Self::features()
            .into_iter()
            .filter(|feature| nightly_build || !feature.nightly_only)
            .collect()
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let flags: Vec<String> = cpuinfo
                .lines()
                .filter(|line| line.starts_with("flags") || line.starts_with("Features"))
                .flat_map(|line| line.split_whitespace().map(str::to_lowercase))
                .collect();

            for feature in features.iter_mut() {
                feature.detected = feature
                    .requires
                    .iter()
                    .all(|required| flags.iter().any(|flag| flag == required));
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    "avx512" => ["avx512f", "avx512bw", "avx512dq", "avx512vl"]
                        .iter()
                        .all(|flag| contents.contains(&format!("hw.optional.{flag}: 1"))),
                    "avx2" => contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => contents.contains("hw.optional.sse4_1: 1"),
                    "neon" => contents.contains("hw.optional.neon: 1"),
                    _ => false,
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Reads the features rustc generates code for. Intrinsics only inline into
// callers compiled with the matching feature, so this decides the backend.
struct CodegenDetector;
impl CodegenDetector {
    fn detect_features(features: &mut [CpuFeature]) {
        let enabled = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
        let enabled: Vec<&str> = enabled.split(',').collect();

        for feature in features.iter_mut() {
            feature.enabled = feature
                .requires
                .iter()
                .all(|required| enabled.contains(&codegen_name(required)));
        }
    }
}

// cpuinfo and rustc spell a few features differently
fn codegen_name(flag: &str) -> &str {
    match flag {
        "sse4_1" => "sse4.1",
        other => other,
    }
}

// TODO: Develop a Windows detector (Access to a windows machine needed)

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn compiler_channel() -> String {
        let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
        let version_info = Command::new(rustc)
            .args(["--version", "--verbose"])
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).into_owned())
            .unwrap_or_default();

        if version_info.contains("nightly") {
            "nightly".to_string()
        } else {
            "stable".to_string()
        }
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        // Only the highest level enabled for codegen is emitted; none means the portable backend
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.enabled)
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        let selected = priority_of(features, cfg_flag);
        if let Some(unused) = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected && !cpu_feature.enabled)
            .filter(|cpu_feature| cpu_feature.priority() < selected)
        {
            println!(
                "cargo:warning=host supports {} but it is not enabled for codegen; \
                 build with RUSTFLAGS=\"-C target-cpu=native\"",
                unused.name
            );
        }

        println!("cargo:warning=lanes256 backend: {cfg_flag}");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx512)");
        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn priority_of(features: &[CpuFeature], cfg_flag: &str) -> usize {
    features
        .iter()
        .find(|cpu_feature| cpu_feature.cfg_flag == cfg_flag)
        .map(CpuFeature::priority)
        .unwrap_or(usize::MAX)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let rustc_channel = PlatformDetector::compiler_channel();

    // Some features like avx512 are available only with nightly build
    println!("cargo:rustc-cfg=rustc_channel=\"{rustc_channel}\"");
    println!("cargo::rustc-check-cfg=cfg(rustc_channel, values(\"nightly\", \"stable\"))");

    let mut features = CpuFeature::available(rustc_channel == "nightly");

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    // Only run CPU detection for native builds
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }
    CodegenDetector::detect_features(&mut features);

    PlatformDetector::apply(&mut features);
}
