// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 分析结果模型
//!
//! 这些结果由外部分析服务生成，本系统只负责承载与展示。

use serde::{Deserialize, Serialize};

/// 问题严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// 投入/影响等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoIssue {
    pub page: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub issue: String,
    pub fix: String,
}

/// 站点审计结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub score: u32,
    pub total_page_count: u32,
    pub critical_issues: u32,
    pub warnings: u32,
    pub passed_checks: u32,
    pub issues: Vec<SeoIssue>,
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingTimeline {
    pub keyword: String,
    pub difficulty: u32,
    pub estimated_months: String,
    pub effort_level: Level,
}

/// 单个商品页的优化分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSeoAnalysis {
    pub product_name: String,
    pub current_rank: u32,
    pub page_number: u32,
    pub title_optimized: bool,
    pub desc_optimized: bool,
    pub image_alt_optimized: bool,
    pub schema_found: bool,
    pub suggested_keywords: Vec<String>,
    pub ranking_strategy: String,
    pub meta_title: String,
    pub meta_description: String,
    pub h1_tag: String,
    pub alt_text_found: Vec<String>,
    pub ranking_timeline: Vec<RankingTimeline>,
}

/// 分类页分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSeoAnalysis {
    pub collection_name: String,
    pub internal_links_count: u32,
    pub product_count: u32,
    pub header_hierarchy: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub canonical_set: bool,
    pub top_ranked_competitors: Vec<String>,
    pub optimization_gaps: Vec<String>,
}

/// 排名路线图中的一个阶段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPhase {
    pub phase: String,
    pub tasks: Vec<String>,
    pub expected_impact: Level,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub volume: String,
    pub difficulty: u32,
    pub cpc: String,
    pub intent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedKeyword {
    pub keyword: String,
    pub volume: String,
    pub difficulty: u32,
    pub intent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub rank: u32,
    pub domain_authority: u32,
    pub url: String,
}

/// 关键词研究结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordResearchResult {
    pub metrics: KeywordMetrics,
    pub related_keywords: Vec<RelatedKeyword>,
    pub competitors: Vec<Competitor>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub task: String,
    pub done: bool,
}

/// 博客文章审计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSeoAnalysis {
    pub blog_title: String,
    pub word_count: u32,
    pub content_quality: String,
    pub ranking_potential: u32,
    pub readability_score: String,
    pub keyword_density: String,
    pub internal_links_count: u32,
    pub external_links_count: u32,
    pub content_strategy: String,
    pub optimization_checklist: Vec<ChecklistItem>,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapAnalysis {
    pub total_urls: u32,
    pub missing_images: u32,
    pub broken_links: Vec<String>,
    pub indexability_issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// 站点地图生成与分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapResult {
    pub xml: String,
    pub urls: Vec<SitemapUrl>,
    pub analysis: SitemapAnalysis,
}

/// 任一分析视图可展示的报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisReport {
    Audit(AuditResult),
    Keyword(KeywordResearchResult),
    Product(ProductSeoAnalysis),
    Collection(CollectionSeoAnalysis),
    Roadmap(Vec<RoadmapPhase>),
    Blog(BlogSeoAnalysis),
    Sitemap(SitemapResult),
}

impl AnalysisReport {
    /// 报告的简要文本行
    pub fn summary_lines(&self) -> Vec<String> {
        match self {
            AnalysisReport::Audit(a) => vec![
                format!("Score: {}/100", a.score),
                format!("Pages: {}", a.total_page_count),
                format!(
                    "Critical: {}  Warnings: {}  Passed: {}",
                    a.critical_issues, a.warnings, a.passed_checks
                ),
            ]
            .into_iter()
            .chain(
                a.issues
                    .iter()
                    .map(|i| format!("[{:?}] {}: {}", i.severity, i.page, i.issue)),
            )
            .collect(),
            AnalysisReport::Keyword(k) => {
                let mut lines = vec![format!(
                    "Volume: {}  Difficulty: {}  CPC: {}  Intent: {}",
                    k.metrics.volume, k.metrics.difficulty, k.metrics.cpc, k.metrics.intent
                )];
                lines.extend(
                    k.related_keywords
                        .iter()
                        .map(|r| format!("- {} ({}, KD {})", r.keyword, r.volume, r.difficulty)),
                );
                lines.push(k.recommendation.clone());
                lines
            }
            AnalysisReport::Product(p) => vec![
                format!("{}: rank #{} (page {})", p.product_name, p.current_rank, p.page_number),
                format!("Title: {}", p.meta_title),
                format!("Suggested: {}", p.suggested_keywords.join(", ")),
            ],
            AnalysisReport::Collection(c) => vec![
                format!("{}: {} products", c.collection_name, c.product_count),
                format!("Internal links: {}", c.internal_links_count),
                format!("Gaps: {}", c.optimization_gaps.join(", ")),
            ],
            AnalysisReport::Roadmap(phases) => phases
                .iter()
                .map(|p| format!("{} ({}): {} tasks", p.phase, p.timeline, p.tasks.len()))
                .collect(),
            AnalysisReport::Blog(b) => vec![
                format!("{} ({} words)", b.blog_title, b.word_count),
                format!("Ranking potential: {}", b.ranking_potential),
                format!(
                    "Checklist: {}/{} done",
                    b.optimization_checklist.iter().filter(|c| c.done).count(),
                    b.optimization_checklist.len()
                ),
            ],
            AnalysisReport::Sitemap(s) => vec![
                format!("URLs: {}", s.analysis.total_urls),
                format!("Broken links: {}", s.analysis.broken_links.len()),
                format!("Missing images: {}", s.analysis.missing_images),
            ],
        }
    }
}
