use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::memory::MemoryScope;
use crate::generator::outlet::{FileOutlet, Outlet, WordPressOutlet};
use crate::generator::{compose, metadata, prepare, research, topic};
use crate::types::post::{GeneratedPost, GenerationRequest, PublishResult};
use crate::utils::html::extract_title;

/// 未指定目标字数时的随机取值范围
const DEFAULT_WORDS_RANGE: std::ops::RangeInclusive<u32> = 2000..=2500;

/// loop模式下相邻两轮之间的等待时间
const LOOP_PAUSE_SECS: u64 = 5;

/// 阶段计时器
pub struct StageTimer {
    start_time: std::time::Instant,
    phase_start_times: HashMap<String, std::time::Instant>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for StageTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTimer {
    pub fn new() -> Self {
        Self {
            start_time: std::time::Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), std::time::Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) {
        if let Some(start_time) = self.phase_start_times.remove(phase_name) {
            self.phase_durations
                .push((phase_name.to_string(), start_time.elapsed()));
        }
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.start_time.elapsed().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 阶段名称常量
pub struct PhaseKeys;

impl PhaseKeys {
    pub const TOPIC: &'static str = "topic";
    pub const RESEARCH: &'static str = "research";
    pub const COMPOSE: &'static str = "compose";
    pub const METADATA: &'static str = "metadata";
    pub const PUBLISH: &'static str = "publish";
}

/// 启动生成与发布工作流
pub async fn launch(config: &Config) -> Result<()> {
    // 配置校验在任何网络调用之前
    config.validate()?;

    let context = GeneratorContext::new(config.clone())?;
    launch_with_context(&context).await
}

/// 在已构建的上下文上启动工作流（测试中可注入检索桩）
pub async fn launch_with_context(context: &GeneratorContext) -> Result<()> {
    let config = &context.config;

    // 上下文文档整个进程只加载一次
    prepare::execute(context).await?;

    // 需要生成内容时，启动前检查模型连接
    if config.load_file.is_none() {
        context.llm_client.check_connection().await?;
    }

    let mut rng = StdRng::from_os_rng();
    let loop_count = config.loop_count;

    for current_loop in 1..=loop_count {
        if loop_count > 1 {
            println!("\n{}", "=".repeat(50));
            println!("第 {} / {} 轮运行", current_loop, loop_count);
            println!("{}\n", "=".repeat(50));
        }

        match run_iteration(context, &mut rng, current_loop, loop_count).await {
            Ok(result) => {
                if config.verbose {
                    println!("本轮发布结果: {:?}", result);
                }
            }
            Err(e) => {
                if current_loop < loop_count {
                    eprintln!("❌ 本轮运行失败: {}，跳到下一轮...", e);
                } else {
                    return Err(e);
                }
            }
        }

        if loop_count > 1 && current_loop < loop_count {
            println!(
                "\n第 {} 轮完成，等待 {} 秒后开始下一轮...",
                current_loop, LOOP_PAUSE_SECS
            );
            tokio::time::sleep(Duration::from_secs(LOOP_PAUSE_SECS)).await;
        }
    }

    Ok(())
}

/// 执行一轮完整流水线：主题 -> 素材 -> 正文 -> 元数据 -> 发布。
/// 每轮恰好产出一篇GeneratedPost。
async fn run_iteration(
    context: &GeneratorContext,
    rng: &mut StdRng,
    current_loop: u32,
    loop_count: u32,
) -> Result<PublishResult> {
    // 清空上一轮的草稿数据
    context.clear_memory_scope(MemoryScope::DRAFT).await;

    let config = &context.config;
    let mut timer = StageTimer::new();

    let request = build_request(config, rng);

    let post = if let Some(load_path) = &config.load_file {
        println!("📂 从文件加载内容: {}", load_path.display());
        load_existing_post(load_path)?
    } else {
        // 1. 主题解析
        timer.start_phase(PhaseKeys::TOPIC);
        topic::resolve(context, rng).await?;
        timer.end_phase(PhaseKeys::TOPIC);

        // 2. 素材检索
        timer.start_phase(PhaseKeys::RESEARCH);
        research::execute(context).await?;
        timer.end_phase(PhaseKeys::RESEARCH);

        // 3. 正文生成
        timer.start_phase(PhaseKeys::COMPOSE);
        let (title, body) = compose::execute(context, &request).await?;
        timer.end_phase(PhaseKeys::COMPOSE);

        GeneratedPost {
            title,
            body,
            metadata: None,
        }
    };

    // 4. 元数据生成（跳过或失败时为None）
    timer.start_phase(PhaseKeys::METADATA);
    let metadata = metadata::execute(context, &post.title, &post.body).await?;
    timer.end_phase(PhaseKeys::METADATA);

    let post = GeneratedPost { metadata, ..post };

    // 5. 发布
    timer.start_phase(PhaseKeys::PUBLISH);
    let output_path = output_path_for(&config.output_file, current_loop, loop_count);

    let result = if config.skip_post {
        // 本地文件模式，不发起任何CMS调用
        let outlet = FileOutlet { path: output_path };
        outlet.publish(context, &post).await?
    } else {
        // 远端发布模式，另存本地副本（如指定了输出文件）
        if output_path.is_some() {
            let outlet = FileOutlet { path: output_path };
            outlet.publish(context, &post).await?;
        }

        match WordPressOutlet.publish(context, &post).await {
            Ok(result) => result,
            Err(e) => {
                let failure = PublishResult::failure(e.to_string());
                eprintln!("❌ WordPress发布失败: {:?}", failure.error);
                return Err(e);
            }
        }
    };
    timer.end_phase(PhaseKeys::PUBLISH);

    if config.verbose {
        println!("\n{}", timer.generate_timing_report());
        println!("Memory用量: {:?}", context.get_memory_stats().await);
    }

    Ok(result)
}

/// 由配置构建本轮的生成请求，未指定字数时随机取值
pub fn build_request<R: Rng>(config: &Config, rng: &mut R) -> GenerationRequest {
    let target_words = config
        .target_words
        .unwrap_or_else(|| rng.random_range(DEFAULT_WORDS_RANGE));

    GenerationRequest {
        topic: config.topic.clone(),
        target_words,
        temperature: config.llm.temperature,
        tone: config.tone,
        structure: config.structure,
        research_enabled: !config.no_research,
    }
}

/// 从已有HTML文件加载文章，标题取自首个标题标签或首行
pub fn load_existing_post(path: &std::path::Path) -> Result<GeneratedPost> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("读取文件 {} 失败: {}", path.display(), e))?;
    let title = extract_title(&body);
    println!("   提取到标题: {}", title);

    Ok(GeneratedPost {
        title,
        body,
        metadata: None,
    })
}

/// loop模式下为本地输出文件附加轮次序号（post.html -> post_2.html）
pub fn output_path_for(
    output_file: &Option<PathBuf>,
    current_loop: u32,
    loop_count: u32,
) -> Option<PathBuf> {
    let path = output_file.as_ref()?;

    if loop_count <= 1 {
        return Some(path.clone());
    }

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let suffixed = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, current_loop, ext.to_string_lossy()),
        None => format!("{}_{}", stem, current_loop),
    };

    Some(path.with_file_name(suffixed))
}
