//! 提取 -> 翻译 -> 回填 的完整文件流程测试

use escape_text::io::{
    load_extracted, save_extracted, DefaultTextReader, DefaultTextWriter, LineEnding, TextFile, TextReader,
    TextWriter,
};
use escape_text::utils::create_backup;
use escape_text::{apply_translations, collect_stats, extract_lines, EscapeConfig, EscapeSequenceSet, Preset, SchemaTable};
use tempfile::tempdir;

const SCRIPT: &str = "\
{\\an8}Previously on Log Horizon
but welcome back to {\\i1}Elder Tale{\\i0}, Naotsugu.
{\\fad(200,0)}
I'm <i>Shiroe</i>.\\NNice to meet you.
";

fn subtitle_config() -> EscapeConfig {
    EscapeConfig::new(SchemaTable::default(), EscapeSequenceSet::preset(Preset::Ass))
}

#[test]
fn test_extract_translate_apply() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("episode.txt");
    let json_path = dir.path().join("episode.json");
    let output_path = dir.path().join("episode_translated.txt");
    std::fs::write(&input_path, SCRIPT).unwrap();

    let config = subtitle_config();
    let input_file = DefaultTextReader.read(&input_path).unwrap();
    let lines = &input_file.lines;
    assert_eq!(lines.len(), 4);

    // 提取
    let extracted = extract_lines(lines, &config).unwrap();
    assert_eq!(
        extracted.iter().map(|line| line.index).collect::<Vec<_>>(),
        vec![0, 1, 3]
    );
    assert_eq!(extracted[2].text, "I'm Shiroe.Nice to meet you.");
    save_extracted(&extracted, &json_path).unwrap();

    // 模拟翻译
    let mut translations = load_extracted(&json_path).unwrap();
    translations[0].text = "Anteriormente en Log Horizon".to_string();
    translations[1].text = "pero bienvenido de nuevo a Elder Tale, Naotsugu.".to_string();
    translations.remove(2);
    save_extracted(&translations, &json_path).unwrap();

    // 回填
    let translations = load_extracted(&json_path).unwrap();
    let output = apply_translations(lines, translations, &config).unwrap();
    DefaultTextWriter.write(&input_file.with_lines(output), &output_path).unwrap();

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(
        written,
        "\
{\\an8}Anteriormente en Log Horizon
pero bienvenido de nuevo{\\i1} a Elder Tale,{\\i0} Naotsugu.
{\\fad(200,0)}
I'm <i>Shiroe</i>.\\NNice to meet you.
"
    );
}

#[test]
fn test_backup_before_overwrite() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("episode_translated.txt");
    std::fs::write(&output_path, "old content\n").unwrap();

    let backup_path = create_backup(&output_path).unwrap();

    assert_ne!(backup_path, output_path);
    assert!(backup_path.to_string_lossy().ends_with(".bak"));
    assert_eq!(std::fs::read_to_string(&backup_path).unwrap(), "old content\n");

    DefaultTextWriter
        .write(&TextFile::new(vec!["new content".to_string()]), &output_path)
        .unwrap();
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "new content\n");
    assert_eq!(std::fs::read_to_string(&backup_path).unwrap(), "old content\n");
}

#[test]
fn test_stats_for_script() {
    let lines: Vec<String> = SCRIPT.lines().map(str::to_string).collect();
    let stats = collect_stats(&lines, &subtitle_config()).unwrap();

    assert_eq!(stats.line_count, 4);
    assert_eq!(stats.translatable_count, 3);
    // {\an8} + {\i1} {\i0} + {\fad(200,0)} + <i> </i> \N
    assert_eq!(stats.escaped_count, 7);
}

#[test]
fn test_apply_keeps_crlf_without_final_newline() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("episode.ass");
    let output_path = dir.path().join("episode_translated.ass");
    std::fs::write(&input_path, "{\\an8}Hello\r\n<i>Bye</i>").unwrap();

    let config = subtitle_config();
    let input_file = DefaultTextReader.read(&input_path).unwrap();
    assert_eq!(input_file.line_ending, LineEnding::CrLf);

    let mut translations = extract_lines(&input_file.lines, &config).unwrap();
    translations[0].text = "Hola".to_string();
    translations[1].text = "Adiós".to_string();

    let output = apply_translations(&input_file.lines, translations, &config).unwrap();
    DefaultTextWriter.write(&input_file.with_lines(output), &output_path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "{\\an8}Hola\r\n<i>Adiós</i>"
    );
}
