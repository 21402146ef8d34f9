use criterion::{Criterion, criterion_group, criterion_main};
use forum_markup_engine::{MarkupParser, TextCodec, parse_markup, to_markup};

fn generate_post(sections: usize) -> String {
    let mut post = String::new();
    for i in 0..sections {
        post.push_str(&format!(
            "[b]Section {i}[/b] with [url=https://4pda.to/forum/index.php?showtopic={i}]a link[/url] and text %D0%9F&amp;.\n\
             [quote name=\"user{i}\" post={i}]Quoted [i]reply[/i] [quote]nested[/quote][/quote]\n\
             [spoiler=\"Details {i}\"][list=1][*]one[*]two[*][img=\"https://x.org/{i}.png\" width=64 height=64][/list][/spoiler]\n\
             [center][size=4]centered [quote]literal[/quote][/size][/center]\n\
             [code]let x = {i}; [b]raw[/b][/code]\n"
        ));
    }
    post
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    let content = generate_post(100);
    let parser = MarkupParser::default();
    group.bench_function("parse_100_sections", |b| {
        b.iter(|| std::hint::black_box(parser.parse(std::hint::black_box(&content))));
    });

    let nested = "[quote]".repeat(100) + "deep" + &"[/quote]".repeat(100);
    group.bench_function("parse_nested_quotes", |b| {
        b.iter(|| std::hint::black_box(parser.parse(std::hint::black_box(&nested))));
    });

    let tree = parse_markup(&content);
    group.bench_function("write_100_sections", |b| {
        b.iter(|| std::hint::black_box(to_markup(std::hint::black_box(&tree))));
    });

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let codec = TextCodec::default();
    c.bench_function("decode_percent_utf8", |b| {
        b.iter(|| codec.decode_percent(std::hint::black_box("%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82")));
    });
}

criterion_group!(benches, bench_parse, bench_codec);
criterion_main!(benches);
