use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use escape_text::{
    apply_translations, collect_stats, extract_lines, EscapeConfig, EscapeSequenceSet, ExtractedLine,
    Preset, SnapDirection,
};
use escape_text::encoding::can_encode;
use escape_text::io::{
    load_extracted, save_extracted, DefaultTextReader, DefaultTextWriter, TextFile, TextReader, TextWriter,
};
use escape_text::utils::create_backup;

#[derive(Parser)]
#[command(name = "escape_text")]
#[command(about = "从带标签和转义序列的文本中提取可翻译内容，并把译文插回原位")]
#[command(version = "0.1.0")]
struct Cli {
    /// 输入文本文件路径（UTF-8，每行一条）
    #[arg(short, long)]
    input: PathBuf,

    /// 输出文件路径
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 使用预设转义序列（python / alphabet / ass）
    #[arg(long)]
    escapes: Option<String>,

    /// 切点向左吸附到上一个分隔符
    #[arg(long)]
    go_left: bool,

    /// 切点吸附的分隔符
    #[arg(long)]
    delimiter: Option<String>,

    /// 译文目标编码（如 shift_jis），无法编码的字符会被丢弃
    #[arg(long)]
    encoding: Option<String>,

    /// 显示文本统计信息
    #[arg(long)]
    stats: bool,

    /// 静默模式(仅输出错误)
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 应用翻译模式：从翻译JSON文件把译文插回原文
    #[arg(long)]
    apply_translations: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    validate_input(&cli.input)?;
    let config = build_config(&cli)?;

    let input_file = DefaultTextReader
        .read(&cli.input)
        .with_context(|| format!("读取输入文件失败: {:?}", cli.input))?;

    if cli.stats {
        return handle_stats(&input_file.lines, &config);
    }

    if let Some(translation_file) = &cli.apply_translations {
        return handle_translation_application(&cli, &config, &input_file, translation_file);
    }

    // 默认模式：文本提取
    handle_extraction(&cli, &config, &input_file.lines)
}

/// 初始化日志输出（stderr）
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// 验证输入文件
fn validate_input(input: &Path) -> Result<()> {
    if !input.is_file() {
        bail!("输入文件不存在: {:?}", input);
    }
    Ok(())
}

/// 加载配置文件并应用命令行覆盖
fn build_config(cli: &Cli) -> Result<EscapeConfig> {
    let mut config = match &cli.config {
        Some(path) => EscapeConfig::load(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?,
        None => EscapeConfig::default(),
    };

    if let Some(name) = &cli.escapes {
        let preset: Preset = name.parse()?;
        config.escapes = EscapeSequenceSet::preset(preset);
    }

    if cli.go_left {
        config.split.direction = SnapDirection::Left;
    }

    if let Some(delimiter) = &cli.delimiter {
        config.split.delimiter = delimiter.clone();
    }

    if let Some(encoding) = &cli.encoding {
        config.encoding = Some(encoding.clone());
    }

    if let Some(encoding) = &config.encoding {
        can_encode("", encoding)?;
    }

    Ok(config)
}

/// 处理统计模式
fn handle_stats(lines: &[String], config: &EscapeConfig) -> Result<()> {
    let stats = collect_stats(lines, config).context("统计文本失败")?;
    println!("{}", stats);
    Ok(())
}

/// 处理文本提取
fn handle_extraction(cli: &Cli, config: &EscapeConfig, lines: &[String]) -> Result<()> {
    let extracted = extract_lines(lines, config).context("提取文本失败")?;

    let output_path = get_extraction_output_path(cli);
    if output_path == cli.input {
        bail!("输出文件不能与输入文件相同: {:?}", output_path);
    }
    backup_existing_output(cli, &output_path)?;

    save_extracted(&extracted, &output_path)
        .with_context(|| format!("写入文件失败: {:?}", output_path))?;

    if !cli.quiet {
        print_extraction_summary(lines.len(), &extracted, &output_path);
    }

    Ok(())
}

/// 处理翻译文件应用
fn handle_translation_application(
    cli: &Cli,
    config: &EscapeConfig,
    input_file: &TextFile,
    translation_file: &Path,
) -> Result<()> {
    if !translation_file.is_file() {
        bail!("翻译文件不存在: {:?}", translation_file);
    }

    let translations = load_translations(translation_file)?;
    let output_path = get_translation_output_path(cli);

    backup_existing_output(cli, &output_path)?;

    let translation_count = translations.len();
    let output = apply_translations(&input_file.lines, translations, config).context("应用翻译失败")?;

    // 保持输入文件的换行格式
    DefaultTextWriter
        .write(&input_file.with_lines(output), &output_path)
        .with_context(|| format!("写入文件失败: {:?}", output_path))?;

    if !cli.quiet {
        println!("已应用 {} 条翻译", translation_count);
        println!("翻译应用完成，输出到: {:?}", output_path);
    }

    Ok(())
}

/// 输出文件已存在时先备份
fn backup_existing_output(cli: &Cli, output_path: &Path) -> Result<()> {
    if !output_path.exists() {
        return Ok(());
    }

    let backup_path = create_backup(output_path)
        .with_context(|| format!("创建备份失败: {:?}", output_path))?;
    if !cli.quiet {
        println!("已创建备份文件: {:?}", backup_path);
    }
    Ok(())
}

/// 加载翻译文件
fn load_translations(translation_file: &Path) -> Result<Vec<ExtractedLine>> {
    load_extracted(translation_file)
        .with_context(|| format!("解析翻译文件失败: {:?}", translation_file))
}

/// 打印提取摘要信息
fn print_extraction_summary(line_count: usize, extracted: &[ExtractedLine], output_path: &Path) {
    println!("扫描到 {} 行", line_count);
    println!("提取到 {} 条可翻译文本", extracted.len());
    println!("结果已写入: {:?}", output_path);

    // 显示样例文本
    if !extracted.is_empty() {
        println!("\n样例文本:");
        for (i, line) in extracted.iter().take(3).enumerate() {
            println!("{}. [{}] \"{}\"",
                i + 1,
                line.index,
                if line.text.chars().count() > 50 {
                    format!("{}...", line.text.chars().take(50).collect::<String>())
                } else {
                    line.text.clone()
                }
            );
        }

        if extracted.len() > 3 {
            println!("... 还有 {} 条文本", extracted.len() - 3);
        }
    }
}

/// 获取提取输出路径
///
/// 默认与输入同名、扩展名改为 json；输入本身就是 json 时改为 `{stem}_extracted.json`。
fn get_extraction_output_path(cli: &Cli) -> PathBuf {
    cli.output.clone().unwrap_or_else(|| {
        let output = cli.input.with_extension("json");
        if output != cli.input {
            return output;
        }
        let stem = cli.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        cli.input.with_file_name(format!("{}_extracted.json", stem))
    })
}

/// 获取翻译输出路径
fn get_translation_output_path(cli: &Cli) -> PathBuf {
    cli.output.clone().unwrap_or_else(|| {
        let stem = cli.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = match cli.input.extension() {
            Some(extension) => format!("{}_translated.{}", stem, extension.to_string_lossy()),
            None => format!("{}_translated", stem),
        };
        cli.input.with_file_name(file_name)
    })
}
